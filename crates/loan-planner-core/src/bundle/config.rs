use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoanPlannerError;
use crate::LoanPlannerResult;

/// Branding and packaging options for the generated calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    pub app_name: String,
    pub short_name: String,
    pub page_title: String,
    pub heading: String,
    pub theme_color: String,
    pub background_color: String,
    /// Service worker cache key. Change it to invalidate installed copies.
    pub cache_name: String,
    pub archive_name: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        BundleConfig {
            app_name: "Loan Planner".into(),
            short_name: "LoanCalc".into(),
            page_title: "Loan Calc PWA".into(),
            heading: "Loan Calculator".into(),
            theme_color: "#4a90e2".into(),
            background_color: "#f4f7f6".into(),
            cache_name: "loan-calc-final-v1".into(),
            archive_name: "loan-calculator.zip".into(),
        }
    }
}

impl BundleConfig {
    /// Load from a `.json`, `.yaml` or `.yml` file. Missing keys take defaults.
    pub fn load(path: &Path) -> LoanPlannerResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: BundleConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            Some("json") => serde_json::from_str(&contents)?,
            other => {
                return Err(LoanPlannerError::invalid(
                    "config",
                    format!("unsupported config extension {other:?}; use .json or .yaml"),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the generated markup, CSS, or scripts.
    pub fn validate(&self) -> LoanPlannerResult<()> {
        for (field, value) in [
            ("app_name", &self.app_name),
            ("short_name", &self.short_name),
            ("page_title", &self.page_title),
            ("heading", &self.heading),
            ("cache_name", &self.cache_name),
            ("archive_name", &self.archive_name),
        ] {
            if value.trim().is_empty() {
                return Err(LoanPlannerError::invalid(field, "must not be empty"));
            }
            if value.contains(['<', '>', '\'', '"', '\\', '\n']) {
                return Err(LoanPlannerError::invalid(
                    field,
                    "must not contain quotes, angle brackets, backslashes or newlines",
                ));
            }
        }

        for (field, value) in [
            ("theme_color", &self.theme_color),
            ("background_color", &self.background_color),
        ] {
            if !is_hex_color(value) {
                return Err(LoanPlannerError::invalid(
                    field,
                    format!("'{value}' is not a #rgb or #rrggbb color"),
                ));
            }
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
