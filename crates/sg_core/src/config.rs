//! Run configuration
//!
//! Loaded from YAML (all fields optional) and then overridden by command
//! line flags.

use crate::error::{CoreError, Result};
use crate::filter::ItemFilter;
use crate::model::MAX_PRIORITY;
use crate::ranking::RankingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Triple count above which a cubic-growth warning is logged
pub const DEFAULT_CUBIC_WARNING_THRESHOLD: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Size of the priority histogram; priorities must be below this
    pub max_priority: usize,
    /// Forced ranking mode; `None` lets the caller decide
    pub mode: Option<RankingMode>,
    /// Emit a "Count" column in count mode
    pub show_count: bool,
    pub cubic_warning_threshold: usize,
    pub filter: ItemFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_priority: MAX_PRIORITY,
            mode: None,
            show_count: false,
            cubic_warning_threshold: DEFAULT_CUBIC_WARNING_THRESHOLD,
            filter: ItemFilter::default(),
        }
    }
}

impl RunConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_priority < 2 {
            return Err(CoreError::InvalidConfig(format!(
                "max_priority must be at least 2, got {}",
                self.max_priority
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, DamageType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.max_priority, 100);
        assert_eq!(config.mode, None);
        assert!(!config.show_count);
        assert!(config.filter.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = RunConfig::from_yaml_str(
            "mode: score\nfilter:\n  categories: [offensive, movement]\n  damage: magical\n",
        )
        .unwrap();
        assert_eq!(config.mode, Some(RankingMode::Score));
        assert_eq!(config.max_priority, 100);
        assert_eq!(
            config.filter.categories,
            Some(vec![Category::Offensive, Category::Movement])
        );
        assert_eq!(config.filter.damage, Some(DamageType::Magical));
    }

    #[test]
    fn test_invalid_max_priority() {
        let err = RunConfig::from_yaml_str("max_priority: 1\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_category_in_yaml_fails() {
        let err = RunConfig::from_yaml_str("filter:\n  categories: [explosive]\n").unwrap_err();
        assert!(matches!(err, CoreError::Yaml(_)));
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"max_priority: 10\nshow_count: true\n")?;

        let config = RunConfig::from_yaml_file(file.path())?;
        assert_eq!(config.max_priority, 10);
        assert!(config.show_count);
        Ok(())
    }
}
