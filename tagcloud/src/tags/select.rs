// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{TagEntry, TagIndex};
use crate::page::Page;
use log::{debug, warn};
use std::collections::HashMap;

/// Result of looking up the tag named in a `tags/<tag>` request.
#[derive(Debug, Clone, PartialEq)]
pub enum TagSelection {
    NotFound,
    Found {
        /// Display name of the matched entry.
        tag: String,
        /// Pages in the entry's `page_ids` order, duplicates included.
        pages: Vec<Page>,
    },
}

impl TagSelection {
    pub fn is_found(&self) -> bool {
        matches!(self, TagSelection::Found { .. })
    }

    pub fn pages(&self) -> &[Page] {
        match self {
            TagSelection::Found { pages, .. } => pages,
            TagSelection::NotFound => &[],
        }
    }
}

/// Finds the first entry, in index order, whose name matches `requested`
/// ignoring case.
pub fn find_tag<'a>(index: &'a TagIndex, requested: &str) -> Option<&'a TagEntry> {
    let wanted = requested.trim().to_lowercase();
    index
        .iter()
        .find(|entry| entry.name.to_lowercase() == wanted)
}

/// Collects the pages carrying the requested tag. Page ids that no longer
/// resolve to a page in `pages` are skipped.
pub fn select_tag_pages(index: &TagIndex, pages: &[Page], requested: &str) -> TagSelection {
    let Some(entry) = find_tag(index, requested) else {
        debug!("No tag matches '{}'", requested);
        return TagSelection::NotFound;
    };

    let by_id: HashMap<&str, &Page> = pages.iter().map(|page| (page.id.as_str(), page)).collect();

    let mut selected = Vec::with_capacity(entry.page_ids.len());
    for page_id in &entry.page_ids {
        match by_id.get(page_id.as_str()) {
            Some(page) => selected.push((*page).clone()),
            None => warn!(
                "Tag '{}' references unknown page '{}'; skipping",
                entry.name, page_id
            ),
        }
    }

    TagSelection::Found {
        tag: entry.name.clone(),
        pages: selected,
    }
}
