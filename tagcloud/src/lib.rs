// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod binder;
pub mod config;
pub mod content;
pub mod host;
pub mod page;
pub mod request;
pub mod routing;
pub mod tags;
pub mod templates;

pub use binder::RenderDirective;
pub use config::{ConfigError, TaggerConfig};
pub use page::{Page, PageMeta, TagField};
pub use request::TagRequest;
pub use routing::{RouteState, classify};
