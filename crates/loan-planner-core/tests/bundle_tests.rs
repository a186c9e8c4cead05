#![cfg(feature = "bundle")]

use std::io::{Cursor, Read};

use loan_planner_core::amortization::MAX_PERIODS;
use loan_planner_core::bundle::{self, BundleConfig, WebManifest};
use pretty_assertions::assert_eq;

fn read_entry(archive: &mut zip::ZipArchive<impl Read + std::io::Seek>, name: &str) -> String {
    let mut contents = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    contents
}

// ===========================================================================
// Archive contents
// ===========================================================================

#[test]
fn test_bundle_archive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = BundleConfig::default();
    let path = dir.path().join(&config.archive_name);

    let entries = bundle::write_bundle(&config, &path).unwrap();
    assert_eq!(
        entries,
        ["index.html", "style.css", "app.js", "manifest.json", "sw.js", "README.txt"]
    );

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 6);

    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        ["README.txt", "app.js", "index.html", "manifest.json", "style.css", "sw.js"]
    );

    let index = read_entry(&mut archive, "index.html");
    assert!(index.contains("<title>Loan Calc PWA</title>"));
    assert!(index.contains(r#"<script src="app.js"></script>"#));
}

#[test]
fn test_manifest_matches_config() {
    let config = BundleConfig {
        app_name: "Mortgage Desk".into(),
        short_name: "Desk".into(),
        ..BundleConfig::default()
    };
    let assets = bundle::render_assets(&config).unwrap();
    let bytes = bundle::write_archive(&assets, Cursor::new(Vec::new()))
        .unwrap()
        .into_inner();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

    let manifest: WebManifest =
        serde_json::from_str(&read_entry(&mut archive, "manifest.json")).unwrap();
    assert_eq!(manifest.name, "Mortgage Desk");
    assert_eq!(manifest.short_name, "Desk");
    assert_eq!(manifest.start_url, "./index.html");
    assert_eq!(manifest.display, "standalone");
    assert_eq!(manifest.icons.len(), 2);
    assert_eq!(manifest.icons[1].sizes, "512x512");

    let raw: serde_json::Value =
        serde_json::from_str(&read_entry(&mut archive, "manifest.json")).unwrap();
    assert_eq!(raw["icons"][0]["type"], "image/png");
}

#[test]
fn test_service_worker_precaches_every_asset() {
    let config = BundleConfig {
        cache_name: "loan-calc-v2".into(),
        ..BundleConfig::default()
    };
    let assets = bundle::render_assets(&config).unwrap();
    let worker = &assets.iter().find(|a| a.name == "sw.js").unwrap().contents;

    assert!(worker.contains("const CACHE_NAME = 'loan-calc-v2';"));
    for entry in ["./", "./index.html", "./style.css", "./app.js", "./manifest.json", "./chart.js"] {
        assert!(worker.contains(&format!("'{entry}',")), "sw.js misses {entry}");
    }
}

#[test]
fn test_client_script_mirrors_engine_constants() {
    let assets = bundle::render_assets(&BundleConfig::default()).unwrap();
    let app = &assets.iter().find(|a| a.name == "app.js").unwrap().contents;

    assert!(app.contains("const BALANCE_EPSILON = 0.01;"));
    assert!(app.contains("const SAFETY_MULTIPLIER = 2;"));
    assert!(app.contains("if (principal > balance)"));
    assert!(app.contains("navigator.serviceWorker.register('./sw.js')"));
}

#[test]
fn test_client_script_refuses_terms_the_engine_refuses() {
    let assets = bundle::render_assets(&BundleConfig::default()).unwrap();
    let app = &assets.iter().find(|a| a.name == "app.js").unwrap().contents;

    assert!(app.contains(&format!("const MAX_PERIODS = {MAX_PERIODS};")));
    assert!(app.contains("Math.abs(months - contractedPeriods) > 1e-9"));
    assert!(app.contains("contractedPeriods > MAX_PERIODS"));
    assert!(!app.contains("Math.round(years * 12)"));
}

#[test]
fn test_write_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("site");
    let written = bundle::write_directory(&BundleConfig::default(), &out).unwrap();

    assert_eq!(written.len(), 6);
    let readme = std::fs::read_to_string(out.join("README.txt")).unwrap();
    assert!(readme.starts_with("Loan Planner\n============\n"));
}
