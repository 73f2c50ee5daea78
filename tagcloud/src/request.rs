// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::binder::{RenderDirective, bind};
use crate::config::TaggerConfig;
use crate::page::Page;
use crate::routing::{RouteState, classify};
use crate::tags::{TagIndex, TagSelection, assign_sizes, select_tag_pages};
use log::debug;

/// Tag state for a single request. Built in one pass and dropped once the
/// response is rendered; nothing is shared between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRequest {
    route: RouteState,
    index: TagIndex,
    selection: Option<TagSelection>,
}

impl TagRequest {
    /// Classifies `path`, builds and scales the tag index when needed and
    /// selects the pages of a requested tag.
    pub fn process(config: &TaggerConfig, path: &str, pages: &[Page]) -> Self {
        let route = classify(path);

        if !should_aggregate(&route, config.widget_mode) {
            debug!("Request '{}' is not a tag route; skipping tag index", path);
            return Self {
                route,
                index: TagIndex::new(config.keying),
                selection: None,
            };
        }

        let mut index = TagIndex::build(pages, config.keying);
        assign_sizes(&mut index, config.size_bounds);

        let selection = route
            .requested_tag()
            .map(|tag| select_tag_pages(&index, pages, tag));

        debug!(
            "Request '{}' classified as {:?} with {} tags",
            path,
            route,
            index.len()
        );

        Self {
            route,
            index,
            selection,
        }
    }

    pub fn route(&self) -> &RouteState {
        &self.route
    }

    pub fn index(&self) -> &TagIndex {
        &self.index
    }

    pub fn selection(&self) -> Option<&TagSelection> {
        self.selection.as_ref()
    }

    /// True for `tags/<tag>` requests whose tag does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.selection, Some(TagSelection::NotFound))
    }

    pub fn into_directive(self, config: &TaggerConfig) -> RenderDirective {
        bind(config, self.route, self.index, self.selection)
    }
}

fn should_aggregate(route: &RouteState, widget_mode: bool) -> bool {
    route.is_tag_route() || widget_mode
}
