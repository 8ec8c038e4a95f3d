//! Content loaders for reading calculator data from files.
//!
//! Pet and rank-8 tables are JSON or RON, picked by file extension;
//! configuration is TOML.

pub mod config;
pub mod pets;
pub mod rank8;

pub use config::ConfigLoader;
pub use pets::{PetTable, PetTableLoader};
pub use rank8::{Rank8Entry, Rank8Loader, Rank8Table};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Serialization format of a table file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Ron,
}

impl DataFormat {
    /// Picks the format from the file extension; anything but `.ron` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Self::Ron,
            _ => Self::Json,
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(self, content: &str, what: &str) -> LoadResult<T> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} JSON: {}", what, e)),
            Self::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e)),
        }
    }
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DataFormat::from_path(Path::new("data/pets.ron")), DataFormat::Ron);
        assert_eq!(DataFormat::from_path(Path::new("data/pets.RON")), DataFormat::Ron);
        assert_eq!(DataFormat::from_path(Path::new("data/pets.json")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("data/pets")), DataFormat::Json);
    }
}
