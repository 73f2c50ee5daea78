// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::TagIndex;
use log::debug;

/// Display size range for the tag cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self { min: 12, max: 24 }
    }
}

/// Assigns every entry a size by linear interpolation of its occurrence
/// between the least and most frequent tag.
pub fn assign_sizes(index: &mut TagIndex, bounds: SizeBounds) {
    let Some(min_occ) = index.iter().map(|entry| entry.occurrence).min() else {
        return;
    };
    let max_occ = index
        .iter()
        .map(|entry| entry.occurrence)
        .max()
        .unwrap_or(min_occ);

    let spread = match max_occ - min_occ {
        0 => 1,
        spread => spread,
    };
    // i64 subtraction of the bounds can overflow.
    let step = (bounds.max as f64 - bounds.min as f64) / spread as f64;

    for entry in index.entries_mut() {
        entry.size = scaled_size(entry.occurrence, min_occ, step, bounds.min);
    }

    debug!(
        "Scaled {} tags: occurrence {}..={} to size {}..={}",
        index.len(),
        min_occ,
        max_occ,
        bounds.min,
        bounds.max
    );
}

fn scaled_size(occurrence: usize, min_occ: usize, step: f64, min_size: i64) -> i64 {
    let offset = (occurrence - min_occ) as f64 * step;
    // f64::round rounds half away from zero; the cast saturates.
    (min_size as f64 + offset).round() as i64
}
