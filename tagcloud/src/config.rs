// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::tags::{SizeBounds, TagKeying};
use log::{debug, warn};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read once at startup and shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    pub size_bounds: SizeBounds,
    pub widget_mode: bool,
    pub keying: TagKeying,
    pub tags_template: String,
    pub tags_meta_title: String,
    pub tags_meta_description: String,
    pub tagcloud_template: String,
    pub tagcloud_meta_title: String,
    pub tagcloud_meta_description: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            size_bounds: SizeBounds::default(),
            widget_mode: false,
            keying: TagKeying::CaseSensitive,
            tags_template: default_tags_template(),
            tags_meta_title: default_tags_meta_title(),
            tags_meta_description: default_tags_meta_description(),
            tagcloud_template: default_tagcloud_template(),
            tagcloud_meta_title: default_tagcloud_meta_title(),
            tagcloud_meta_description: default_tagcloud_meta_description(),
        }
    }
}

fn default_tags_template() -> String {
    "tags.twig".to_string()
}

fn default_tags_meta_title() -> String {
    "Tagged with: {{ current_tag }}".to_string()
}

fn default_tags_meta_description() -> String {
    "Pages tagged with: {{ current_tag }}".to_string()
}

fn default_tagcloud_template() -> String {
    "tagcloud.twig".to_string()
}

fn default_tagcloud_meta_title() -> String {
    "Tag Cloud".to_string()
}

fn default_tagcloud_meta_description() -> String {
    "This is the Tag Cloud for this site.".to_string()
}

impl TaggerConfig {
    /// Applies the recognized keys of a host configuration map on top of the
    /// defaults. Unrecognized keys belong to the host and are ignored.
    pub fn from_mapping(mapping: &Mapping) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(mapping, "tags_min_size") {
            config.size_bounds.min = coerce_int("tags_min_size", value)?;
        }
        if let Some(value) = lookup(mapping, "tags_max_size") {
            config.size_bounds.max = coerce_int("tags_max_size", value)?;
        }
        if let Some(value) = lookup(mapping, "widget_mode") {
            config.widget_mode = coerce_bool("widget_mode", value)?;
        }
        if let Some(value) = lookup(mapping, "tags_case_insensitive") {
            config.keying = if coerce_bool("tags_case_insensitive", value)? {
                TagKeying::CaseInsensitive
            } else {
                TagKeying::CaseSensitive
            };
        }
        if let Some(value) = lookup(mapping, "tagcloud_template") {
            config.tagcloud_template = coerce_string("tagcloud_template", value)?;
        }
        if let Some(value) = lookup(mapping, "tags_template") {
            config.tags_template = coerce_string("tags_template", value)?;
        }
        if let Some(value) = lookup(mapping, "tags_meta_title") {
            config.tags_meta_title = coerce_string("tags_meta_title", value)?;
        }
        if let Some(value) = lookup(mapping, "tags_meta_description") {
            config.tags_meta_description = coerce_string("tags_meta_description", value)?;
        }
        if let Some(value) = lookup(mapping, "tagcloud_meta_title") {
            config.tagcloud_meta_title = coerce_string("tagcloud_meta_title", value)?;
        }
        if let Some(value) = lookup(mapping, "tagcloud_meta_description") {
            config.tagcloud_meta_description =
                coerce_string("tagcloud_meta_description", value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw_config: Value = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::LoadError(format!("Failed to parse config: {}", e)))?;
        match raw_config {
            Value::Mapping(mapping) => Self::from_mapping(&mapping),
            Value::Null => Ok(Self::default()),
            _ => Err(ConfigError::LoadError(
                "Configuration must be a mapping of keys to values".to_string(),
            )),
        }
    }

    /// Reads `config.yaml` under `root`. A missing file means defaults.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            debug!(
                "No configuration at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&config_content).map_err(|e| match e {
            ConfigError::LoadError(msg) => {
                ConfigError::LoadError(format!("{} ({})", msg, config_path.display()))
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tags_template.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "tags_template cannot be empty".to_string(),
            ));
        }
        if self.tagcloud_template.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "tagcloud_template cannot be empty".to_string(),
            ));
        }

        // Inverted bounds are allowed.
        if self.size_bounds.min >= self.size_bounds.max {
            warn!(
                "tags_min_size ({}) is not below tags_max_size ({}); tag sizes will not grow with frequency",
                self.size_bounds.min, self.size_bounds.max
            );
        }

        Ok(())
    }
}

fn lookup<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    match mapping.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn coerce_int(key: &str, value: &Value) -> Result<i64, ConfigError> {
    let parsed = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|float| float.trunc() as i64))
        }
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    };

    parsed.ok_or_else(|| {
        ConfigError::ValidationError(format!("{} must be an integer, got: {:?}", key, value))
    })
}

fn coerce_bool(key: &str, value: &Value) -> Result<bool, ConfigError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::Number(number) => Ok(number.as_f64().is_some_and(|float| float != 0.0)),
        Value::String(text) => Ok(!matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "no" | "off"
        )),
        _ => Err(ConfigError::ValidationError(format!(
            "{} must be a boolean, got: {:?}",
            key, value
        ))),
    }
}

fn coerce_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(ConfigError::ValidationError(format!(
            "{} must be a string, got: {:?}",
            key, value
        ))),
    }
}
