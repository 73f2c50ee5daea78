// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::borrow::Cow;

const TAGS_SEGMENT: &str = "tags";

/// How a request relates to the tag pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteState {
    /// Not a tag route; the host serves the request as usual.
    #[default]
    None,
    TagCloud,
    TagDetail(String),
}

impl RouteState {
    pub fn is_tag_route(&self) -> bool {
        !matches!(self, RouteState::None)
    }

    pub fn requested_tag(&self) -> Option<&str> {
        match self {
            RouteState::TagDetail(tag) => Some(tag.as_str()),
            _ => None,
        }
    }
}

/// Classifies the request path (no query string, still URL encoded).
///
/// `tags` is the cloud and `tags/<tag>` a single tag. A bare `tags/` or a
/// deeper path such as `tags/a/b` is not a tag route.
pub fn classify(path: &str) -> RouteState {
    if path == TAGS_SEGMENT {
        return RouteState::TagCloud;
    }

    let Some(rest) = path.strip_prefix("tags/") else {
        return RouteState::None;
    };

    if rest.is_empty() || rest.contains('/') {
        return RouteState::None;
    }

    RouteState::TagDetail(decode_segment(rest).into_owned())
}

/// Form-style decoding: `+` is a space, `%XX` escapes are decoded and
/// invalid UTF-8 is replaced.
fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['+', '%']) {
        return Cow::Borrowed(segment);
    }
    let spaced = segment.replace('+', " ");
    let decoded = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&decoded).into_owned())
}
