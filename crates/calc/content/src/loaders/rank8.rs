//! Guaranteed rank-8 observation table loader.
//!
//! Each pet maps to the observed level-1 vectors known to come only from
//! perfect-rank tuples. Two layouts are accepted per entry:
//!
//! ```text
//! { "count": 2, "obs_100_rank8": [[hp, atk, def, agi], ...] }
//! [[hp, atk, def, agi], ...]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use calc_core::StatVector;
use serde::{Deserialize, Serialize};

use crate::loaders::{DataFormat, LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Rank8EntryFormat {
    Detailed {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        obs_100_rank8: Vec<[i64; 4]>,
    },
    Bare(Vec<[i64; 4]>),
}

/// Guaranteed rank-8 observation sets of one pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Rank8EntryFormat", into = "Rank8EntryFormat")]
pub struct Rank8Entry {
    pub sets: Vec<StatVector>,
}

impl From<Rank8EntryFormat> for Rank8Entry {
    fn from(format: Rank8EntryFormat) -> Self {
        let raw = match format {
            Rank8EntryFormat::Detailed { obs_100_rank8, .. } => obs_100_rank8,
            Rank8EntryFormat::Bare(sets) => sets,
        };
        Self {
            sets: raw.into_iter().map(StatVector::from_array).collect(),
        }
    }
}

impl From<Rank8Entry> for Rank8EntryFormat {
    fn from(entry: Rank8Entry) -> Self {
        Self::Detailed {
            count: Some(entry.sets.len() as u64),
            obs_100_rank8: entry.sets.iter().map(StatVector::to_array).collect(),
        }
    }
}

impl Rank8Entry {
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn contains(&self, obs: &StatVector) -> bool {
        self.sets.contains(obs)
    }

    /// Up to `max` sets as `(hp,atk,def,agi) · ...`, plus the number left out.
    pub fn preview(&self, max: usize) -> (String, usize) {
        let shown: Vec<String> = self.sets.iter().take(max).map(ToString::to_string).collect();
        (shown.join(" · "), self.sets.len().saturating_sub(max))
    }
}

/// Name → guaranteed rank-8 sets.
pub type Rank8Table = BTreeMap<String, Rank8Entry>;

/// Loader for the rank-8 table from JSON or RON files.
pub struct Rank8Loader;

impl Rank8Loader {
    pub fn load(path: &Path) -> LoadResult<Rank8Table> {
        let content = read_file(path)?;
        Self::parse(&content, DataFormat::from_path(path))
    }

    pub fn parse(content: &str, format: DataFormat) -> LoadResult<Rank8Table> {
        format.parse(content, "rank-8 table")
    }

    pub fn to_json(table: &Rank8Table) -> LoadResult<String> {
        serde_json::to_string(table)
            .map_err(|e| anyhow::anyhow!("Failed to serialize rank-8 table: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_layouts() {
        let content = r#"{
            "가디언": { "count": 2, "obs_100_rank8": [[10, 3, 3, 2], [11, 3, 3, 2]] },
            "나이트": [[20, 5, 4, 4]],
            "드래곤": { "count": 0 }
        }"#;
        let table = Rank8Loader::parse(content, DataFormat::Json).unwrap();

        assert_eq!(table["가디언"].sets.len(), 2);
        assert!(table["가디언"].contains(&StatVector::new(11, 3, 3, 2)));
        assert_eq!(table["나이트"].sets, vec![StatVector::new(20, 5, 4, 4)]);
        assert!(table["드래곤"].is_empty());
    }

    #[test]
    fn preview_truncates() {
        let entry = Rank8Entry {
            sets: (0..25).map(|i| StatVector::new(i, 1, 1, 1)).collect(),
        };
        let (text, more) = entry.preview(20);
        assert_eq!(more, 5);
        assert!(text.starts_with("(0,1,1,1) · (1,1,1,1)"));
        assert_eq!(text.matches(" · ").count(), 19);

        let (_, none_left) = entry.preview(30);
        assert_eq!(none_left, 0);
    }

    #[test]
    fn serializes_detailed_layout() {
        let mut table = Rank8Table::new();
        table.insert(
            "alpha".to_string(),
            Rank8Entry {
                sets: vec![StatVector::new(1, 2, 3, 4)],
            },
        );
        let json = Rank8Loader::to_json(&table).unwrap();
        assert!(json.contains("obs_100_rank8"));
        assert_eq!(Rank8Loader::parse(&json, DataFormat::Json).unwrap(), table);
    }
}
