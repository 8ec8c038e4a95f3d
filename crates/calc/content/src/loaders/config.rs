//! Calculator configuration loader.

use std::path::Path;

use calc_core::CalcConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for calculator configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CalcConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CalcConfig> {
        let config: CalcConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("precision = 64\n").unwrap();
        assert_eq!(config.precision, 64);
        assert_eq!(config.total_population, CalcConfig::DEFAULT_TOTAL_POPULATION);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "total_population = 1000\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.total_population, 1000);
        assert_eq!(config.precision, CalcConfig::DEFAULT_PRECISION);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
