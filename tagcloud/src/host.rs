// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::binder::{RenderDirective, STATUS_OK};
use crate::config::TaggerConfig;
use crate::page::Page;
use crate::request::TagRequest;
use crate::tags::TagIndex;
use crate::templates::{
    NOT_FOUND_TEMPLATE, PAGE_TEMPLATE, TemplateEngine, render_minijinja_template,
};
use log::{debug, error};
use minijinja::context;

pub const STATUS_NOT_FOUND: u16 = 404;

const DEFAULT_HOME_ID: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Serves one request the way a flat-file site would: tag routes are
/// rendered from the tag templates, other paths from their page, and
/// everything else as not found.
pub fn respond(
    config: &TaggerConfig,
    engine: &dyn TemplateEngine,
    pages: &[Page],
    path: &str,
) -> Response {
    let path = path.trim_start_matches('/');
    let request = TagRequest::process(config, path, pages);

    if request.is_not_found() {
        debug!("Unknown tag requested at '{}'", path);
        return serve_404(engine, None);
    }

    let directive = request.into_directive(config);

    if let Some(template) = directive.template.as_deref() {
        let status = directive.resolve_status(STATUS_NOT_FOUND);
        return match render_minijinja_template(engine, template, directive.to_value()) {
            Ok(body) => Response { status, body },
            Err(err) => {
                error!("Failed to render template '{}': {}", template, err);
                serve_404(engine, None)
            }
        };
    }

    match find_page(pages, path) {
        Some(page) => serve_page(engine, page, &directive),
        None => serve_404(engine, directive.tag_list.as_ref()),
    }
}

fn find_page<'a>(pages: &'a [Page], path: &str) -> Option<&'a Page> {
    let path = path.trim_end_matches('/');
    let id = if path.is_empty() {
        DEFAULT_HOME_ID.to_string()
    } else {
        path.to_string()
    };
    let index_id = format!("{}/{}", id, DEFAULT_HOME_ID);
    pages
        .iter()
        .find(|page| page.id == id)
        .or_else(|| pages.iter().find(|page| page.id == index_id))
}

fn serve_page(engine: &dyn TemplateEngine, page: &Page, directive: &RenderDirective) -> Response {
    let context = context! {
        meta => context! {
            title => &page.meta.title,
            description => None::<String>
        },
        current_page => page,
        tag_list => &directive.tag_list
    };

    match render_minijinja_template(engine, PAGE_TEMPLATE, context) {
        Ok(body) => Response {
            status: STATUS_OK,
            body,
        },
        Err(err) => {
            error!("Failed to render page '{}': {}", page.id, err);
            Response {
                status: 500,
                body: fallback_500_html(),
            }
        }
    }
}

/// Renders `404.twig`. `tag_list` carries the widget cloud on sites running
/// in widget mode.
pub fn serve_404(engine: &dyn TemplateEngine, tag_list: Option<&TagIndex>) -> Response {
    let context = context! {
        meta => context! { title => None::<String>, description => None::<String> },
        tag_list => tag_list
    };

    let body = match render_minijinja_template(engine, NOT_FOUND_TEMPLATE, context) {
        Ok(html) => html,
        Err(e) => {
            error!("Failed to render 404 error template: {}", e);
            fallback_404_html()
        }
    };

    Response {
        status: STATUS_NOT_FOUND,
        body,
    }
}

fn fallback_404_html() -> String {
    r#"<!DOCTYPE html>
<html><head><title>404 - Page Not Found</title></head>
<body><h1>404 - Page Not Found</h1></body></html>"#
        .to_string()
}

fn fallback_500_html() -> String {
    r#"<!DOCTYPE html>
<html><head><title>500 - Internal Server Error</title></head>
<body><h1>500 - Internal Server Error</h1></body></html>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::TagField;
    use crate::templates::MiniJinjaEngine;

    struct BrokenEngine;

    impl TemplateEngine for BrokenEngine {
        fn render(
            &self,
            template_name: &str,
            _context: minijinja::Value,
        ) -> Result<String, minijinja::Error> {
            Err(minijinja::Error::new(
                minijinja::ErrorKind::TemplateNotFound,
                template_name.to_string(),
            ))
        }
    }

    fn pages() -> Vec<Page> {
        let mut home = Page::new("index", TagField::Absent);
        home.meta.title = Some("Home".to_string());
        vec![
            home,
            Page::new("docs/index", TagField::single("docs")),
            Page::new("blog/post", TagField::single("news")),
        ]
    }

    #[test]
    fn empty_path_serves_home() {
        let engine = MiniJinjaEngine::new();
        let response = respond(&TaggerConfig::default(), &engine, &pages(), "/");
        assert_eq!(response.status, 200);
        assert!(response.body.contains("<h1>Home</h1>"));
    }

    #[test]
    fn directory_path_serves_its_index() {
        let engine = MiniJinjaEngine::new();
        let response = respond(&TaggerConfig::default(), &engine, &pages(), "docs/");
        assert_eq!(response.status, 200);
    }

    #[test]
    fn unknown_page_is_not_found() {
        let engine = MiniJinjaEngine::new();
        let response = respond(&TaggerConfig::default(), &engine, &pages(), "missing");
        assert_eq!(response.status, 404);
    }

    #[test]
    fn render_failure_falls_back_to_static_404() {
        let response = respond(&TaggerConfig::default(), &BrokenEngine, &pages(), "tags");
        assert_eq!(response.status, 404);
        assert!(response.body.contains("404 - Page Not Found"));
    }

    #[test]
    fn widget_follows_unknown_pages() {
        let engine = MiniJinjaEngine::new();
        let config = TaggerConfig {
            widget_mode: true,
            ..TaggerConfig::default()
        };
        let response = respond(&config, &engine, &pages(), "missing");
        assert_eq!(response.status, 404);
        assert!(response.body.contains(r#"<ul class="tag-cloud">"#));
        assert!(response.body.contains(">news</a>"));

        let response = respond(&TaggerConfig::default(), &engine, &pages(), "missing");
        assert!(!response.body.contains("tag-cloud"));
    }

    #[test]
    fn unknown_tag_has_no_widget() {
        let engine = MiniJinjaEngine::new();
        let config = TaggerConfig {
            widget_mode: true,
            ..TaggerConfig::default()
        };
        let response = respond(&config, &engine, &pages(), "tags/golang");
        assert_eq!(response.status, 404);
        assert!(!response.body.contains("tag-cloud"));
    }

    #[test]
    fn leading_slash_is_ignored() {
        let engine = MiniJinjaEngine::new();
        let response = respond(&TaggerConfig::default(), &engine, &pages(), "/tags");
        assert_eq!(response.status, 200);
        assert!(response.body.contains("Tag Cloud"));
    }

    #[test]
    fn bare_tags_prefix_is_not_a_tag_page() {
        let engine = MiniJinjaEngine::new();
        let response = respond(&TaggerConfig::default(), &engine, &pages(), "/tags/");
        assert_eq!(response.status, 404);
    }
}
