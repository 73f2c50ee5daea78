// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::page::{Page, TagField};
use log::debug;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub name: String,
    pub page_ids: Vec<String>,
    pub occurrence: usize,
    pub size: i64,
}

impl TagEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            page_ids: Vec::new(),
            occurrence: 0,
            size: 0,
        }
    }

    fn push_page(&mut self, page_id: &str) {
        self.page_ids.push(page_id.to_string());
        self.occurrence = self.page_ids.len();
    }
}

/// How tag names are grouped into entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagKeying {
    /// `News` and `news` are separate entries.
    #[default]
    CaseSensitive,
    /// Entries are keyed by the lower-cased name; the first-seen casing is
    /// kept as the display name.
    CaseInsensitive,
}

impl TagKeying {
    fn key(self, name: &str) -> String {
        match self {
            TagKeying::CaseSensitive => name.to_string(),
            TagKeying::CaseInsensitive => name.to_lowercase(),
        }
    }
}

/// Tag name to entry, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    keying: TagKeying,
    entries: Vec<TagEntry>,
    positions: HashMap<String, usize>,
}

impl TagIndex {
    pub fn new(keying: TagKeying) -> Self {
        Self {
            keying,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Scans every page in collection order and groups page ids by tag.
    pub fn build(pages: &[Page], keying: TagKeying) -> Self {
        let mut index = Self::new(keying);
        for page in pages {
            for tag in normalize_tags(&page.meta.tags) {
                index.insert(&tag, &page.id);
            }
        }
        debug!(
            "Built tag index with {} tags from {} pages",
            index.len(),
            pages.len()
        );
        index
    }

    pub fn insert(&mut self, tag: &str, page_id: &str) {
        let position = match self.positions.entry(self.keying.key(tag)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.entries.push(TagEntry::new(tag));
                *entry.insert(self.entries.len() - 1)
            }
        };
        self.entries[position].push_page(page_id);
    }

    /// Looks up an entry by its grouping key.
    pub fn get(&self, name: &str) -> Option<&TagEntry> {
        let position = self.positions.get(&self.keying.key(name))?;
        self.entries.get(*position)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [TagEntry] {
        &mut self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagIndex {
    type Item = &'a TagEntry;
    type IntoIter = std::slice::Iter<'a, TagEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Templates see the index as an ordered `name => entry` map.
impl Serialize for TagIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|entry| (&entry.name, entry)))
    }
}

/// Splits and trims raw tag metadata. Empty names are dropped.
pub fn normalize_tags(field: &TagField) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }

    let raw: Vec<&str> = match field {
        TagField::Absent => Vec::new(),
        TagField::Single(value) => value.split(',').collect(),
        TagField::Many(values) => values.iter().map(String::as_str).collect(),
    };

    raw.into_iter()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, tags: &str) -> Page {
        Page::new(id, TagField::single(tags))
    }

    fn ids(entry: &TagEntry) -> Vec<&str> {
        entry.page_ids.iter().map(String::as_str).collect()
    }

    #[test]
    fn normalize_splits_and_trims_strings() {
        assert_eq!(
            normalize_tags(&TagField::single(" rust ,web,  cli")),
            vec!["rust", "web", "cli"]
        );
    }

    #[test]
    fn normalize_trims_list_elements() {
        assert_eq!(
            normalize_tags(&TagField::many([" a", "b ", "a, b"])),
            vec!["a", "b", "a, b"]
        );
    }

    #[test]
    fn normalize_drops_empty_names() {
        assert_eq!(normalize_tags(&TagField::single("a,,b, ")), vec!["a", "b"]);
        assert!(normalize_tags(&TagField::single("")).is_empty());
        assert!(normalize_tags(&TagField::Absent).is_empty());
    }

    #[test]
    fn entries_follow_first_seen_order() {
        let pages = vec![page("p1", "b, a"), page("p2", "c, a")];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        let names: Vec<&str> = index.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(ids(index.get("a").expect("a")), vec!["p1", "p2"]);
    }

    #[test]
    fn occurrence_tracks_page_ids() {
        let pages = vec![page("p1", "x"), page("p2", "x, y"), page("p3", "x")];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        for entry in &index {
            assert_eq!(entry.occurrence, entry.page_ids.len());
        }
        assert_eq!(index.get("x").expect("x").occurrence, 3);
        assert_eq!(index.get("y").expect("y").occurrence, 1);
    }

    #[test]
    fn duplicate_tag_on_one_page_counts_twice() {
        let pages = vec![page("A", "x, x")];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        let entry = index.get("x").expect("x");
        assert_eq!(ids(entry), vec!["A", "A"]);
        assert_eq!(entry.occurrence, 2);
    }

    #[test]
    fn case_sensitive_keying_keeps_casings_apart() {
        let pages = vec![page("A", "News"), page("B", "news")];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("News").expect("News").occurrence, 1);
        assert_eq!(index.get("news").expect("news").occurrence, 1);
        assert!(index.get("NEWS").is_none());
    }

    #[test]
    fn case_insensitive_keying_merges_casings() {
        let pages = vec![page("A", "News"), page("B", "news")];
        let index = TagIndex::build(&pages, TagKeying::CaseInsensitive);
        assert_eq!(index.len(), 1);
        let entry = index.get("NEWS").expect("merged entry");
        assert_eq!(entry.name, "News");
        assert_eq!(ids(entry), vec!["A", "B"]);
    }

    #[test]
    fn pages_without_tags_are_skipped() {
        let pages = vec![
            Page::new("a", TagField::Absent),
            page("b", ""),
            Page::new("c", TagField::Many(Vec::new())),
        ];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        assert!(index.is_empty());
    }

    #[test]
    fn building_twice_is_identical() {
        let pages = vec![page("p1", "b, a, b"), page("p2", "a"), page("p3", "c")];
        let first = TagIndex::build(&pages, TagKeying::CaseSensitive);
        let second = TagIndex::build(&pages, TagKeying::CaseSensitive);
        assert_eq!(first, second);
    }

    #[test]
    fn occurrence_histogram_matches_tag_counts() {
        let pages = vec![
            page("p1", "a, b"),
            page("p2", "a, c"),
            page("p3", "a, b"),
            page("p4", "d"),
        ];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for page in &pages {
            for tag in normalize_tags(&page.meta.tags) {
                *counts.entry(tag).or_default() += 1;
            }
        }
        for k in 1..=3 {
            let expected = counts.values().filter(|count| **count == k).count();
            let actual = index.iter().filter(|entry| entry.occurrence == k).count();
            assert_eq!(actual, expected, "occurrence {}", k);
        }
    }

    #[test]
    fn serializes_as_ordered_map() {
        let pages = vec![page("p1", "z, a")];
        let index = TagIndex::build(&pages, TagKeying::CaseSensitive);
        let yaml = serde_yaml::to_string(&index).expect("serialize");
        let z = yaml.find("z:").expect("z key");
        let a = yaml.find("\na:").expect("a key");
        assert!(z < a);
        assert!(yaml.contains("occurrence: 1"));
    }
}
