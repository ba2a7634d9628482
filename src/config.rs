//! File-level configuration shared by the adapters.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{error::BoundaryResult, store::StoreOptions};

/// Top-level configuration document.
///
/// ```json
/// { "store": { "keyPrefix": "boundary_", "compression": { "maxPoints": 300 } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BoundaryConfig {
    pub store: StoreOptions,
}

impl BoundaryConfig {
    /// Load and check a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("[config] Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("[config] Failed to parse configuration")?;
        config.check()?;
        Ok(config)
    }

    #[inline] pub fn check(&self) -> BoundaryResult<()> { self.store.check() }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = BoundaryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, BoundaryConfig::default());
        assert_eq!(config.store.limits.max_records, 20);
    }

    #[test]
    fn nested_overrides() {
        let config = BoundaryConfig::from_json_str(
            r#"{"store": {"keyPrefix": "plot_", "compression": {"maxPoints": 300}, "thumbnail": null}}"#,
        ).unwrap();
        assert_eq!(config.store.key_prefix, "plot_");
        assert_eq!(config.store.compression.unwrap().max_points, 300);
        assert!(config.store.thumbnail.is_none());
    }

    #[test]
    fn unknown_and_out_of_range_fields_are_rejected() {
        assert!(BoundaryConfig::from_json_str(r#"{"stor": {}}"#).is_err());
        assert!(BoundaryConfig::from_json_str(r#"{"store": {"validation": {"minVertices": 2}}}"#).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"store": {{"limits": {{"maxRecords": 3}}}}}}"#).unwrap();
        let config = BoundaryConfig::from_path(file.path()).unwrap();
        assert_eq!(config.store.limits.max_records, 3);

        let err = BoundaryConfig::from_path(Path::new("/nonexistent/pavemeasure.json")).unwrap_err();
        assert!(format!("{err:#}").contains("[config]"));
    }
}
