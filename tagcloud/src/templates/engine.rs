// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Environment, Error, ErrorKind, Value, default_auto_escape_callback};
use std::fs;
use std::path::Path;

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Engine serving only the embedded default templates.
    pub fn new() -> Self {
        let mut env = base_environment();
        env.set_loader(embedded_template_loader);
        Self { env }
    }

    /// Engine that looks in `theme_dir` first and falls back to the embedded
    /// defaults.
    pub fn with_theme_dir(theme_dir: &Path) -> Self {
        let theme_dir = theme_dir.to_path_buf();
        let mut env = base_environment();
        env.set_loader(move |name| match theme_template(&theme_dir, name)? {
            Some(source) => Ok(Some(source)),
            None => embedded_template_loader(name),
        });
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // `.twig` names are HTML too.
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".twig") {
            minijinja::AutoEscape::Html
        } else {
            default_auto_escape_callback(name)
        }
    });
    env
}

fn theme_template(theme_dir: &Path, name: &str) -> Result<Option<String>, Error> {
    if name.contains("..") || name.starts_with('/') || name.contains('\\') {
        return Ok(None);
    }
    let path = theme_dir.join(name);
    if !path.is_file() {
        return Ok(None);
    }
    fs::read_to_string(&path).map(Some).map_err(|err| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("Failed to read template {}: {}", path.display(), err),
        )
    })
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "tags.twig" => Some(include_str!("defaults/tags.twig")),
        "tagcloud.twig" => Some(include_str!("defaults/tagcloud.twig")),
        "page.twig" => Some(include_str!("defaults/page.twig")),
        "404.twig" => Some(include_str!("defaults/404.twig")),
        "partials/tag_list.twig" => Some(include_str!("defaults/partials/tag_list.twig")),
        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
