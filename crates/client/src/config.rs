//! Client configuration from environment variables.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use calc_content::ConfigLoader;
use calc_core::CalcConfig;

/// Configuration required to load tables and build the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub table_path: PathBuf,
    pub rank8_path: Option<PathBuf>,
    /// Table cache directory; the platform cache directory when unset.
    pub cache_dir: Option<PathBuf>,
    /// Optional TOML file with calculator settings.
    pub config_path: Option<PathBuf>,
    pub precision: Option<u64>,
    pub total_population: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("data/pets.json"),
            rank8_path: Some(PathBuf::from("data/rank8.json")),
            cache_dir: None,
            config_path: None,
            precision: None,
            total_population: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PETCALC_TABLE` - Pet table, JSON or RON (default: data/pets.json)
    /// - `PETCALC_RANK8` - Guaranteed rank-8 table (default: data/rank8.json)
    /// - `PETCALC_CACHE_DIR` - Table cache directory (default: platform cache)
    /// - `PETCALC_CONFIG` - Calculator settings TOML (optional)
    /// - `PETCALC_PRECISION` - Decimal significant digits (default: 50)
    /// - `PETCALC_TOTAL_POPULATION` - Appearance-rate denominator (default: 178750)
    /// - `PETCALC_LOG_DIR` - Log directory (default: platform cache)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        if let Some(table) = path("PETCALC_TABLE") {
            config.table_path = table;
        }
        if let Some(rank8) = path("PETCALC_RANK8") {
            config.rank8_path = Some(rank8);
        }
        config.cache_dir = path("PETCALC_CACHE_DIR");
        config.config_path = path("PETCALC_CONFIG");
        config.log_dir = path("PETCALC_LOG_DIR");
        config.precision = read_value(&lookup, "PETCALC_PRECISION");
        config.total_population = read_value(&lookup, "PETCALC_TOTAL_POPULATION");

        config
    }

    /// Calculator settings: the TOML file if any, then explicit overrides.
    pub fn calc_config(&self) -> Result<CalcConfig> {
        let mut calc = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => CalcConfig::default(),
        };
        if let Some(precision) = self.precision {
            calc.precision = precision;
        }
        if let Some(total) = self.total_population {
            calc.total_population = total;
        }
        Ok(calc)
    }

    pub fn rank8_path(&self) -> Option<&Path> {
        self.rank8_path.as_deref()
    }
}

fn read_value<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
