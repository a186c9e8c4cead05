use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

use loan_planner_core::bundle::manifest::ICON_SIZES;
use loan_planner_core::bundle::{self, BundleConfig, EXTERNAL_ASSETS};

/// Arguments for generating the static calculator
#[derive(Args)]
pub struct BundleArgs {
    /// Zip archive to write (defaults to the configured archive name)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write plain files into this directory instead of a zip
    #[arg(long, conflicts_with = "out")]
    pub dir: Option<PathBuf>,

    /// Branding config file (.json, .yaml or .yml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_bundle(args: BundleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = match args.config {
        Some(ref path) => BundleConfig::load(path)?,
        None => BundleConfig::default(),
    };

    let (target, files): (PathBuf, Vec<String>) = if let Some(dir) = args.dir {
        let written = bundle::write_directory(&config, &dir)?;
        let files = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        (dir, files)
    } else {
        let path = args
            .out
            .unwrap_or_else(|| PathBuf::from(&config.archive_name));
        let files = bundle::write_bundle(&config, &path)?;
        (path, files)
    };

    Ok(json!({
        "output": target.display().to_string(),
        "files": files,
        "still_needed": EXTERNAL_ASSETS
            .iter()
            .map(|s| s.to_string())
            .chain(ICON_SIZES.iter().map(|size| format!("icons/icon-{size}.png")))
            .collect::<Vec<_>>(),
    }))
}
