// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tagcloud::config::TaggerConfig;
use tagcloud::content::load_pages;
use tagcloud::host::{Response, respond};
use tagcloud::page::{Page, TagField};
use tagcloud::templates::MiniJinjaEngine;
use tempfile::TempDir;

/// A throwaway site root with `config.yaml`, `content/` and `themes/`.
pub struct SiteHarness {
    pub root: TempDir,
}

impl SiteHarness {
    pub fn new() -> Self {
        let root = TempDir::new().expect("site root");
        fs::create_dir_all(root.path().join("content")).expect("content dir");
        Self { root }
    }

    /// The sample blog used by most tests.
    pub fn blog() -> Self {
        let site = Self::new();
        site.write_page("index.md", "---\ntitle: Home\n---\nWelcome\n");
        site.write_page(
            "blog/first.md",
            "---\ntitle: First Post\ntags: rust, web\n---\n",
        );
        site.write_page(
            "blog/second.md",
            "---\ntitle: Second Post\ntags:\n  - rust\n  - open source\n---\n",
        );
        site.write_page("blog/third.md", "---\ntitle: Third Post\nTags: Rust\n---\n");
        site.write_page("about.md", "---\ntitle: About\n---\n");
        site
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(self.path().join("config.yaml"), yaml).expect("write config");
    }

    pub fn write_page(&self, relative: &str, content: &str) {
        let path = self.path().join("content").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("page dir");
        }
        fs::write(path, content).expect("write page");
    }

    pub fn write_theme(&self, name: &str, content: &str) {
        let dir = self.path().join("themes");
        fs::create_dir_all(&dir).expect("theme dir");
        fs::write(dir.join(name), content).expect("write theme");
    }

    pub fn config(&self) -> TaggerConfig {
        TaggerConfig::load(self.path()).expect("config")
    }

    pub fn pages(&self) -> Vec<Page> {
        load_pages(&self.path().join("content")).expect("pages")
    }

    pub fn get(&self, path: &str) -> Response {
        let theme_dir = self.path().join("themes");
        let engine = if theme_dir.is_dir() {
            MiniJinjaEngine::with_theme_dir(&theme_dir)
        } else {
            MiniJinjaEngine::new()
        };
        respond(&self.config(), &engine, &self.pages(), path)
    }
}

pub fn tagged(id: &str, tags: &str) -> Page {
    Page::new(id, TagField::single(tags))
}
