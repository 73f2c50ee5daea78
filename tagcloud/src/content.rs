// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::page::{Page, PageMeta, TagField};
use gray_matter::{Matter, Pod, engine::YAML};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const MARKDOWN_EXTENSION: &str = "md";
const INDEX_PAGE: &str = "index";

#[derive(Debug)]
pub enum ContentError {
    Walk(String),
    Read(PathBuf, std::io::Error),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Walk(msg) => write!(f, "Failed to scan content directory: {}", msg),
            ContentError::Read(path, err) => {
                write!(f, "Failed to read page {}: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for ContentError {}

/// Loads every markdown page below `content_dir`, sorted by id.
///
/// The id is the path relative to `content_dir` without the `.md` extension,
/// using `/` as separator. Hidden files and directories are skipped.
pub fn load_pages(content_dir: &Path) -> Result<Vec<Page>, ContentError> {
    let mut pages = Vec::new();

    let walker = WalkDir::new(content_dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|err| ContentError::Walk(err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(MARKDOWN_EXTENSION) {
            continue;
        }

        let Some(id) = page_id(content_dir, path) else {
            warn!("Skipping page with unusable path: {}", path.display());
            continue;
        };

        let source =
            fs::read_to_string(path).map_err(|err| ContentError::Read(path.to_path_buf(), err))?;
        let mut meta = parse_front_matter(&source);
        meta.url = Some(page_url(&id));
        pages.push(Page { id, meta });
    }

    pages.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(
        "Loaded {} pages from {}",
        pages.len(),
        content_dir.display()
    );
    Ok(pages)
}

/// Reads the page metadata the tag pipeline cares about from YAML front
/// matter. Both `tags` and `Tags` are accepted.
pub fn parse_front_matter(content: &str) -> PageMeta {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(content);
    let mut meta = PageMeta::default();

    if let Some(data) = parsed.data
        && let Pod::Hash(map) = data
    {
        if let Some(value) = map.get("title").or_else(|| map.get("Title"))
            && let Ok(title) = value.as_string()
        {
            meta.title = Some(title);
        }
        if let Some(value) = map.get("tags").or_else(|| map.get("Tags")) {
            meta.tags = tag_field_from_pod(value);
        }
    }

    meta
}

fn tag_field_from_pod(value: &Pod) -> TagField {
    match value {
        Pod::String(text) => TagField::Single(text.clone()),
        Pod::Array(items) => TagField::Many(items.iter().filter_map(scalar_to_string).collect()),
        _ => TagField::Absent,
    }
}

fn scalar_to_string(value: &Pod) -> Option<String> {
    match value {
        Pod::String(text) => Some(text.clone()),
        Pod::Integer(number) => Some(number.to_string()),
        Pod::Float(number) => Some(number.to_string()),
        Pod::Boolean(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn page_id(content_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(content_dir).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// `index` maps to `/`, `docs/index` to `/docs/`, anything else to `/<id>`.
pub fn page_url(id: &str) -> String {
    if id == INDEX_PAGE {
        return "/".to_string();
    }
    match id.strip_suffix("/index") {
        Some(dir) => format!("/{}/", dir),
        None => format!("/{}", id),
    }
}
