//! Pet record table loader.

use std::collections::BTreeMap;
use std::path::Path;

use calc_core::PetRecord;

use crate::loaders::{DataFormat, LoadResult, read_file};

/// Name → record, sorted by name.
pub type PetTable = BTreeMap<String, PetRecord>;

/// Loader for the pet table from JSON or RON files.
pub struct PetTableLoader;

impl PetTableLoader {
    /// Load the table; the format follows the file extension.
    ///
    /// The top level must be a map keyed by pet name.
    pub fn load(path: &Path) -> LoadResult<PetTable> {
        let content = read_file(path)?;
        Self::parse(&content, DataFormat::from_path(path))
    }

    pub fn parse(content: &str, format: DataFormat) -> LoadResult<PetTable> {
        format.parse(content, "pet table")
    }

    /// Serializes a table as JSON, the format of the local cache.
    pub fn to_json(table: &PetTable) -> LoadResult<String> {
        serde_json::to_string(table)
            .map_err(|e| anyhow::anyhow!("Failed to serialize pet table: {}", e))
    }
}
