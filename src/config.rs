use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::from_slice;

use crate::aggregate::DomainPolicy;
use crate::error::Result;
use crate::transform::{DEFAULT_SENTINEL, TransformOptions};

/// Dashboard settings, read from a JSON file. Every field has a default.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub data_dir: PathBuf,
    pub gdp_file: String,
    pub internet_file: String,
    pub boundaries_file: String,
    /// Metadata lines before the CSV header (4 in raw World Bank downloads).
    pub skip_lines: usize,
    pub min_year: i32,
    pub sentinels: Vec<String>,
    pub domain: DomainPolicy,
    /// Optional name reconciliation override file, relative to `data_dir`.
    pub names: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            gdp_file: "global_gdp.csv".to_string(),
            internet_file: "internet_usage.csv".to_string(),
            boundaries_file: "world.geojson".to_string(),
            skip_lines: 0,
            min_year: 2000,
            sentinels: vec![DEFAULT_SENTINEL.to_string()],
            domain: DomainPolicy::default(),
            names: None,
        }
    }
}

impl AtlasConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(from_slice(&bytes)?)
    }

    /// Reads `path` if it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() { Self::load(path) } else { Ok(Self::default()) }
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions { min_year: self.min_year, sentinels: self.sentinels.clone() }
    }

    pub fn names_path(&self) -> Option<PathBuf> {
        self.names.as_ref().map(|p| self.data_dir.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DomainScope;

    #[test]
    fn partial_file_keeps_defaults() {
        let json = br#"{"min_year": 1995, "domain": {"low": 0.05, "high": 0.95, "scope": "global"}}"#;
        let cfg: AtlasConfig = serde_json::from_slice(json).unwrap();
        assert_eq!(cfg.min_year, 1995);
        assert_eq!(cfg.gdp_file, "global_gdp.csv");
        assert_eq!(cfg.domain.scope, DomainScope::Global);
        assert_eq!(cfg.domain.low, 0.05);
        assert_eq!(cfg.transform_options().sentinels, vec![".."]);
    }

    #[test]
    fn missing_file_means_defaults() {
        let cfg = AtlasConfig::load_or_default("/nonexistent/atlas.json").unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.domain, DomainPolicy::default());
        assert!(cfg.names_path().is_none());
    }
}
