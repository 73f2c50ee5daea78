// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;
use tagcloud::config::TaggerConfig;
use tagcloud::content::load_pages;
use tagcloud::host::respond;
use tagcloud::templates::MiniJinjaEngine;

const CONTENT_DIR_NAME: &str = "content";
const THEME_DIR_NAME: &str = "themes";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the site directory.");
            return 1;
        }
    };

    if parsed_args.help {
        print!("{}", help_text());
        return 0;
    }

    init_logging(parsed_args.verbose);

    let config = match TaggerConfig::load(&parsed_args.site_root) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❌ {}", error);
            return 1;
        }
    };

    let content_dir = parsed_args.site_root.join(CONTENT_DIR_NAME);
    let pages = match load_pages(&content_dir) {
        Ok(pages) => pages,
        Err(error) => {
            eprintln!("❌ {}", error);
            return 1;
        }
    };
    info!(
        "Serving '{}' from {} pages in {}",
        parsed_args.request_path,
        pages.len(),
        content_dir.display()
    );

    let theme_dir = parsed_args.site_root.join(THEME_DIR_NAME);
    let engine = if theme_dir.is_dir() {
        MiniJinjaEngine::with_theme_dir(&theme_dir)
    } else {
        MiniJinjaEngine::new()
    };

    let response = respond(&config, &engine, &pages, &parsed_args.request_path);
    println!("status: {}", response.status);
    println!();
    println!("{}", response.body);

    if response.status < 400 { 0 } else { 2 }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // Configure logging with a stable format
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if let Err(error) = result {
        eprintln!("❌ Failed to initialize logger: {}", error);
    }
}

#[derive(Debug)]
struct ParsedArgs {
    site_root: PathBuf,
    request_path: String,
    verbose: bool,
    help: bool,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = ParsedArgs {
        site_root: PathBuf::from("."),
        request_path: String::new(),
        verbose: false,
        help: false,
    };
    let mut paths = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-h" || arg == "--help" {
            parsed.help = true;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            parsed.site_root = PathBuf::from(value);
        } else if arg == "-v" {
            parsed.verbose = true;
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("Unknown option '{}'", arg));
        } else {
            paths.push(arg);
        }
    }

    if paths.len() > 1 {
        return Err("Only one request path may be given".to_string());
    }
    if let Some(path) = paths.pop() {
        parsed.request_path = path;
    }

    Ok(parsed)
}

fn help_text() -> &'static str {
    "Usage: tagcloud [-C <site-root>] [-v] [<request-path>]

Renders one request against a flat-file site:
  <site-root>/config.yaml   tag settings (tags_min_size, widget_mode, ...)
  <site-root>/content/      markdown pages with `tags` front matter
  <site-root>/themes/       optional template overrides

Examples:
  tagcloud -C site tags
  tagcloud -C site tags/rust
"
}
