use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::schema::DEFAULT_STATION;
use crate::traffic::DuplicatePolicy;

/// Which station to analyze and how to treat the passenger data.
///
/// Stored as a JSON object on disk; every field is optional:
/// ```json
/// {
///   "station": "동대문",
///   "zone_pattern": "동대문",
///   "duplicate_policy": "sum"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Station name, matched exactly against the passenger table.
    pub station: String,
    /// Substring matched against sales zone names. Defaults to the station.
    pub zone_pattern: Option<String>,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            station: DEFAULT_STATION.to_string(),
            zone_pattern: None,
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn zone_pattern(&self) -> &str {
        self.zone_pattern.as_deref().unwrap_or(&self.station)
    }
}
