// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

const OPEN_TAG: &str = "{{";
const CLOSE_TAG: &str = "}}";
const CURRENT_TAG_VAR: &str = "current_tag";

/// Replaces the first `{{ current_tag }}` placeholder in a configured meta
/// string with `tag`.
///
/// Only the first `{{ ... }}` span is considered. A span naming anything
/// other than `current_tag`, or an unterminated `{{`, leaves the string as is.
pub fn substitute_current_tag(template: &str, tag: &str) -> String {
    let Some(start) = template.find(OPEN_TAG) else {
        return template.to_string();
    };
    let inner_start = start + OPEN_TAG.len();
    let Some(inner_len) = template[inner_start..].find(CLOSE_TAG) else {
        return template.to_string();
    };
    let inner_end = inner_start + inner_len;

    let name = template[inner_start..inner_end].trim();
    if !name.eq_ignore_ascii_case(CURRENT_TAG_VAR) {
        return template.to_string();
    }

    let mut output = String::with_capacity(template.len() + tag.len());
    output.push_str(&template[..start]);
    output.push_str(tag);
    output.push_str(&template[inner_end + CLOSE_TAG.len()..]);
    output
}
