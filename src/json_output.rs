//! JSON output format for comparison results
//!
//! Writes the complete [`Comparison`] (summary, pair details, aggregate
//! curve, error lists) as `comparison.json` for downstream renderers.

use crate::comparison::Comparison;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the JSON document inside the output directory
pub const JSON_FILE_NAME: &str = "comparison.json";

/// Root JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    #[serde(flatten)]
    pub comparison: &'a Comparison,
}

impl<'a> JsonOutput<'a> {
    /// Wrap a comparison for serialization
    pub fn new(comparison: &'a Comparison) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "cotejo-json-v1".to_string(),
            comparison,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize comparison")
    }

    /// Write `comparison.json` into `dir`, returning the written path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(JSON_FILE_NAME);
        std::fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
