//! Static calculator bundle.
//!
//! Renders the browser calculator (markup, stylesheet, client script,
//! service worker, web manifest, README) and packs it into a zip archive.
//! The client script carries its own copy of the amortization loop; the
//! Rust engine in [`crate::amortization`] is the reference it is tested
//! against.

pub mod config;
pub mod manifest;
pub mod template;

use std::fs::{self, File};
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::amortization::MAX_PERIODS;
use crate::LoanPlannerResult;

pub use config::BundleConfig;
pub use manifest::WebManifest;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const STYLE_CSS: &str = include_str!("../../assets/style.css");
const APP_JS: &str = include_str!("../../assets/app.js");
const SW_JS: &str = include_str!("../../assets/sw.js");
const README_TXT: &str = include_str!("../../assets/README.txt");

/// Files the calculator expects next to the bundle but that are not generated.
pub const EXTERNAL_ASSETS: [&str; 1] = ["chart.js"];

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub contents: String,
}

impl Asset {
    fn new(name: &str, contents: String) -> Self {
        Asset {
            name: name.into(),
            contents,
        }
    }
}

/// Render every generated asset for `config`, in archive order.
pub fn render_assets(config: &BundleConfig) -> LoanPlannerResult<Vec<Asset>> {
    config.validate()?;

    let colors = [
        ("theme_color", config.theme_color.as_str()),
        ("background_color", config.background_color.as_str()),
    ];

    let index = template::render(
        INDEX_HTML,
        &[
            ("page_title", config.page_title.as_str()),
            ("heading", config.heading.as_str()),
            ("theme_color", config.theme_color.as_str()),
        ],
    )?;
    let style = template::render(STYLE_CSS, &colors)?;
    let max_periods = MAX_PERIODS.to_string();
    let app = template::render(
        APP_JS,
        &[
            ("theme_color", config.theme_color.as_str()),
            ("max_periods", max_periods.as_str()),
        ],
    )?;
    let manifest = serde_json::to_string_pretty(&WebManifest::from_config(config))? + "\n";

    let rule = "=".repeat(config.app_name.chars().count());
    let readme = template::render(
        README_TXT,
        &[
            ("app_name", config.app_name.as_str()),
            ("app_name_rule", rule.as_str()),
        ],
    )?;

    let mut assets = vec![
        Asset::new("index.html", index),
        Asset::new("style.css", style),
        Asset::new("app.js", app),
        Asset::new("manifest.json", manifest),
    ];

    // The worker precaches the app shell: every served asset plus the
    // directory index and the user-supplied chart library.
    let mut cached = vec!["./".to_string()];
    cached.extend(assets.iter().map(|a| format!("./{}", a.name)));
    cached.extend(EXTERNAL_ASSETS.iter().map(|name| format!("./{name}")));
    let entries = cached
        .iter()
        .map(|path| format!("    '{path}',"))
        .collect::<Vec<_>>()
        .join("\n");
    let worker = template::render(
        SW_JS,
        &[
            ("cache_name", config.cache_name.as_str()),
            ("cache_entries", entries.as_str()),
        ],
    )?;

    assets.push(Asset::new("sw.js", worker));
    assets.push(Asset::new("README.txt", readme));
    Ok(assets)
}

/// Write `assets` into a deflated zip on `writer`.
///
/// Entry timestamps are fixed so identical inputs give identical archives.
pub fn write_archive<W: Write + Seek>(assets: &[Asset], writer: W) -> LoanPlannerResult<W> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(writer);
    for asset in assets {
        zip.start_file(asset.name.as_str(), options)?;
        zip.write_all(asset.contents.as_bytes())?;
        tracing::debug!(name = %asset.name, bytes = asset.contents.len(), "archived asset");
    }
    Ok(zip.finish()?)
}

/// Render the calculator and write it as a zip archive at `path`.
///
/// Returns the archive entry names in write order.
pub fn write_bundle(config: &BundleConfig, path: &Path) -> LoanPlannerResult<Vec<String>> {
    let assets = render_assets(config)?;
    let file = File::create(path)?;
    write_archive(&assets, file)?;

    tracing::info!(path = %path.display(), files = assets.len(), "wrote calculator bundle");
    Ok(assets.into_iter().map(|a| a.name).collect())
}

/// Render the calculator as plain files under `dir`, creating it if needed.
pub fn write_directory(config: &BundleConfig, dir: &Path) -> LoanPlannerResult<Vec<PathBuf>> {
    let assets = render_assets(config)?;
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(assets.len());
    for asset in &assets {
        let path = dir.join(&asset.name);
        fs::write(&path, &asset.contents)?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "wrote calculator files");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_render_assets_names_in_order() {
        let assets = render_assets(&BundleConfig::default()).unwrap();
        let names: Vec<&str> = assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["index.html", "style.css", "app.js", "manifest.json", "sw.js", "README.txt"]
        );
    }

    #[test]
    fn test_no_placeholders_survive() {
        for asset in render_assets(&BundleConfig::default()).unwrap() {
            assert!(!asset.contents.contains("{{"), "{} has a placeholder", asset.name);
        }
    }

    #[test]
    fn test_theme_color_applied() {
        let config = BundleConfig {
            theme_color: "#123456".into(),
            ..BundleConfig::default()
        };
        let assets = render_assets(&config).unwrap();
        let style = assets.iter().find(|a| a.name == "style.css").unwrap();
        assert!(style.contents.contains("background-color: #123456;"));
        assert!(!style.contents.contains("#4a90e2"));
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = BundleConfig {
            background_color: "#zzz".into(),
            ..BundleConfig::default()
        };
        assert!(render_assets(&config).is_err());
    }

    #[test]
    fn test_archive_is_deterministic() {
        let assets = render_assets(&BundleConfig::default()).unwrap();
        let a = write_archive(&assets, Cursor::new(Vec::new())).unwrap().into_inner();
        let b = write_archive(&assets, Cursor::new(Vec::new())).unwrap().into_inner();
        assert_eq!(a, b);
    }
}
