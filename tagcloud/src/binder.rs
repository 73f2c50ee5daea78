// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::TaggerConfig;
use crate::page::Page;
use crate::routing::RouteState;
use crate::tags::{TagIndex, TagSelection};
use crate::templates::substitute_current_tag;
use log::debug;
use minijinja::{Value, context};

pub const STATUS_OK: u16 = 200;

/// What the host should change about the response it is about to render.
///
/// Fields left as `None` mean "keep what the host already has".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderDirective {
    pub route: RouteState,
    /// A tag page has no backing content file, so the host's not-found
    /// status must be replaced with success.
    pub status_override: bool,
    pub template: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub tag_list: Option<TagIndex>,
    pub current_tag: Option<String>,
    pub tags_pages: Option<Vec<Page>>,
}

impl RenderDirective {
    pub fn resolve_status(&self, host_status: u16) -> u16 {
        if self.status_override {
            STATUS_OK
        } else {
            host_status
        }
    }

    /// Template variables: `meta.title`, `meta.description`, `tag_list`,
    /// `current_tag` and `tags_pages`.
    pub fn to_value(&self) -> Value {
        context! {
            meta => context! {
                title => &self.meta_title,
                description => &self.meta_description
            },
            tag_list => &self.tag_list,
            current_tag => &self.current_tag,
            tags_pages => &self.tags_pages
        }
    }
}

/// Assembles the directive for one request from the route, the scaled index
/// and, for tag details, the selection.
pub fn bind(
    config: &TaggerConfig,
    route: RouteState,
    index: TagIndex,
    selection: Option<TagSelection>,
) -> RenderDirective {
    match route {
        RouteState::TagCloud => RenderDirective {
            route: RouteState::TagCloud,
            status_override: true,
            template: Some(config.tagcloud_template.clone()),
            meta_title: Some(config.tagcloud_meta_title.clone()),
            meta_description: Some(config.tagcloud_meta_description.clone()),
            tag_list: Some(index),
            ..RenderDirective::default()
        },
        RouteState::TagDetail(requested) => match selection {
            Some(TagSelection::Found { pages, .. }) => RenderDirective {
                status_override: true,
                template: Some(config.tags_template.clone()),
                meta_title: Some(substitute_current_tag(&config.tags_meta_title, &requested)),
                meta_description: Some(substitute_current_tag(
                    &config.tags_meta_description,
                    &requested,
                )),
                current_tag: Some(requested.clone()),
                tags_pages: Some(pages),
                route: RouteState::TagDetail(requested),
                ..RenderDirective::default()
            },
            Some(TagSelection::NotFound) | None => {
                debug!("Tag '{}' not found; leaving response untouched", requested);
                RenderDirective {
                    route: RouteState::TagDetail(requested),
                    ..RenderDirective::default()
                }
            }
        },
        RouteState::None => RenderDirective {
            tag_list: config.widget_mode.then_some(index),
            ..RenderDirective::default()
        },
    }
}
