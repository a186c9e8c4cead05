use serde::{Deserialize, Serialize};

use super::config::BundleConfig;

/// Icon sizes the manifest advertises. The PNGs are supplied by the user.
pub const ICON_SIZES: [u32; 2] = [192, 512];

/// Web app manifest (`manifest.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

impl WebManifest {
    pub fn from_config(config: &BundleConfig) -> Self {
        WebManifest {
            name: config.app_name.clone(),
            short_name: config.short_name.clone(),
            start_url: "./index.html".into(),
            display: "standalone".into(),
            background_color: config.background_color.clone(),
            theme_color: config.theme_color.clone(),
            icons: ICON_SIZES
                .iter()
                .map(|size| ManifestIcon {
                    src: format!("icons/icon-{size}.png"),
                    sizes: format!("{size}x{size}"),
                    media_type: "image/png".into(),
                })
                .collect(),
        }
    }
}
