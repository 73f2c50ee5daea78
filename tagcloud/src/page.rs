// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;

/// A content page as handed over by the host. Only `id` and `meta.tags`
/// matter to the tag pipeline; the rest is passed through to templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: String,
    pub meta: PageMeta,
}

impl Page {
    pub fn new(id: impl Into<String>, tags: TagField) -> Self {
        Self {
            id: id.into(),
            meta: PageMeta {
                tags,
                ..PageMeta::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub tags: TagField,
}

/// Raw `tags` metadata. Front matter may carry a comma separated string or a
/// list; every other shape is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagField {
    #[default]
    Absent,
    Single(String),
    Many(Vec<String>),
}

impl TagField {
    pub fn single(value: &str) -> Self {
        TagField::Single(value.to_string())
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagField::Many(values.into_iter().map(Into::into).collect())
    }

    /// Mirrors a loosely typed truthiness check: empty strings and empty
    /// lists carry no tags.
    pub fn is_empty(&self) -> bool {
        match self {
            TagField::Absent => true,
            TagField::Single(value) => value.is_empty(),
            TagField::Many(values) => values.is_empty(),
        }
    }
}
