//! Read-only pet catalog and its file-backed loader.
//!
//! [`Catalog`] bundles the pet table, the guaranteed rank-8 table and a name
//! index behind `Arc`s so every handle shares one immutable snapshot.
//! [`CatalogLoader`] reads the primary files and keeps a copy of each table in
//! a local cache directory, which serves as the fallback when a primary file
//! cannot be read.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use calc_content::{NameIndex, PetTable, PetTableLoader, Rank8Entry, Rank8Loader, Rank8Table};
use calc_core::PetRecord;
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};

const PETS_CACHE_FILE: &str = "pets.json";
const RANK8_CACHE_FILE: &str = "rank8.json";

/// Immutable snapshot of the lookup tables.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pets: Arc<PetTable>,
    rank8: Arc<Rank8Table>,
    index: Arc<NameIndex>,
}

impl Catalog {
    pub fn new(pets: PetTable, rank8: Rank8Table) -> Self {
        let index = NameIndex::new(pets.keys().cloned());
        Self {
            pets: Arc::new(pets),
            rank8: Arc::new(rank8),
            index: Arc::new(index),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PetRecord> {
        self.pets.get(name)
    }

    /// Guaranteed rank-8 sets of `name`; `None` when the pet has none.
    pub fn rank8(&self, name: &str) -> Option<&Rank8Entry> {
        self.rank8.get(name).filter(|entry| !entry.is_empty())
    }

    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Names containing `keyword` whose chosung starts with `prefix`.
    pub fn search(&self, keyword: &str, prefix: &str) -> Vec<&str> {
        self.index.filter(keyword, prefix)
    }
}

/// Where a table was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSource {
    Primary,
    Cache,
    Empty,
}

/// A catalog plus the provenance of each table.
#[derive(Clone, Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub pets_source: TableSource,
    pub rank8_source: TableSource,
}

/// Loads the catalog from data files with a cache fallback.
#[derive(Clone, Debug)]
pub struct CatalogLoader {
    pets_path: PathBuf,
    rank8_path: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl CatalogLoader {
    /// Loader for `pets_path`, caching into the platform cache directory.
    pub fn new(pets_path: impl Into<PathBuf>) -> Self {
        Self {
            pets_path: pets_path.into(),
            rank8_path: None,
            cache_dir: default_cache_dir(),
        }
    }

    pub fn rank8(mut self, path: impl Into<PathBuf>) -> Self {
        self.rank8_path = Some(path.into());
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache_dir = None;
        self
    }

    /// Reads both tables.
    ///
    /// Per table: the primary file wins and refreshes the cache; otherwise the
    /// cached copy is used; otherwise the table starts empty. Never fails.
    pub fn load(&self) -> LoadedCatalog {
        let (pets, pets_source) = load_table(
            "pet table",
            Some(self.pets_path.as_path()),
            self.cache_path(PETS_CACHE_FILE).as_deref(),
            PetTableLoader::load,
            PetTableLoader::to_json,
        );
        let (rank8, rank8_source) = load_table(
            "rank-8 table",
            self.rank8_path.as_deref(),
            self.cache_path(RANK8_CACHE_FILE).as_deref(),
            Rank8Loader::load,
            Rank8Loader::to_json,
        );

        info!(
            target: "runtime::catalog",
            pets = pets.len(),
            rank8 = rank8.len(),
            ?pets_source,
            ?rank8_source,
            "Catalog loaded"
        );

        LoadedCatalog {
            catalog: Catalog::new(pets, rank8),
            pets_source,
            rank8_source,
        }
    }

    fn cache_path(&self, file: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| dir.join(file))
    }
}

/// Platform cache directory for the tables, if one can be determined.
pub fn default_cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "petcalc").map(|dirs| dirs.cache_dir().join("tables"))
}

fn load_table<T, E>(
    what: &'static str,
    primary: Option<&Path>,
    cache: Option<&Path>,
    load: fn(&Path) -> std::result::Result<T, E>,
    to_json: fn(&T) -> std::result::Result<String, E>,
) -> (T, TableSource)
where
    T: Default,
    E: std::fmt::Display,
{
    let read = |path: &Path| {
        load(path).map_err(|e| RuntimeError::CatalogLoad {
            what,
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    };

    if let Some(primary) = primary {
        match read(primary) {
            Ok(table) => {
                if let Some(cache) = cache {
                    match to_json(&table) {
                        Ok(json) => {
                            if let Err(error) = write_cache(what, cache, &json) {
                                warn!(target: "runtime::catalog", %error, "Cache not updated");
                            }
                        }
                        Err(error) => {
                            warn!(target: "runtime::catalog", what, %error, "Cache not updated");
                        }
                    }
                }
                return (table, TableSource::Primary);
            }
            Err(error) => {
                warn!(target: "runtime::catalog", %error, "Primary load failed, trying cache");
            }
        }
    }

    if let Some(cache) = cache {
        match read(cache) {
            Ok(table) => {
                warn!(
                    target: "runtime::catalog",
                    what,
                    path = %cache.display(),
                    "Using cached copy"
                );
                return (table, TableSource::Cache);
            }
            Err(error) => {
                debug!(target: "runtime::catalog", %error, "No usable cache");
            }
        }
    }

    warn!(target: "runtime::catalog", what, "Starting with an empty table");
    (T::default(), TableSource::Empty)
}

/// Writes through a temp file and renames it into place.
fn write_cache(what: &'static str, path: &Path, json: &str) -> Result<()> {
    let io_error = |source: std::io::Error| RuntimeError::CacheWrite {
        what,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(io_error)?;
    fs::rename(&temp_path, path).map_err(io_error)?;

    debug!(target: "runtime::catalog", what, path = %path.display(), "Cache updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &str = r#"{ "가디언": { "k": 50, "u": { "hp": 0, "atk": 0, "def": 0, "agi": 0 } } }"#;
    const RANK8: &str = r#"{ "가디언": [[10, 3, 3, 2]], "나이트": { "count": 0 } }"#;

    #[test]
    fn primary_load_refreshes_cache() {
        let data = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        let pets = data.path().join("pets.json");
        let rank8 = data.path().join("rank8.json");
        fs::write(&pets, PETS).unwrap();
        fs::write(&rank8, RANK8).unwrap();

        let loaded = CatalogLoader::new(&pets)
            .rank8(&rank8)
            .cache_dir(cache.path())
            .load();

        assert_eq!(loaded.pets_source, TableSource::Primary);
        assert_eq!(loaded.rank8_source, TableSource::Primary);
        assert_eq!(loaded.catalog.len(), 1);
        assert!(loaded.catalog.rank8("가디언").is_some());
        assert!(loaded.catalog.rank8("나이트").is_none());
        assert!(cache.path().join(PETS_CACHE_FILE).exists());
        assert!(cache.path().join(RANK8_CACHE_FILE).exists());
    }

    #[test]
    fn falls_back_to_cache_then_empty() {
        let data = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        let pets = data.path().join("pets.json");
        fs::write(&pets, PETS).unwrap();

        CatalogLoader::new(&pets).cache_dir(cache.path()).load();

        fs::write(&pets, "[not a table").unwrap();
        let loaded = CatalogLoader::new(&pets).cache_dir(cache.path()).load();
        assert_eq!(loaded.pets_source, TableSource::Cache);
        assert!(loaded.catalog.get("가디언").is_some());
        assert_eq!(loaded.rank8_source, TableSource::Empty);

        let missing = CatalogLoader::new(data.path().join("absent.json"))
            .without_cache()
            .load();
        assert_eq!(missing.pets_source, TableSource::Empty);
        assert!(missing.catalog.is_empty());
    }

    #[test]
    fn search_uses_name_index() {
        let mut pets = PetTable::new();
        pets.insert("가디언".to_string(), PetRecord::default());
        pets.insert("까마귀".to_string(), PetRecord::default());
        pets.insert("나이트".to_string(), PetRecord::default());
        let catalog = Catalog::new(pets, Rank8Table::new());

        assert_eq!(catalog.search("", "ㄱ"), vec!["가디언", "까마귀"]);
        assert_eq!(catalog.search("이트", ""), vec!["나이트"]);
        assert_eq!(catalog.index().len(), 3);
    }
}
