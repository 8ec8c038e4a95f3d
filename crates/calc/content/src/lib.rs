//! Data-driven pet tables, loaders and name search.
//!
//! This crate reads the static data the calculator consumes:
//! - Pet records (name → snapshots and known parameters, JSON or RON)
//! - Guaranteed rank-8 observation sets (JSON or RON)
//! - Calculator configuration (TOML)
//!
//! Tables are owned by the caller and handed to the runtime as read-only
//! snapshots; nothing here holds process-wide state.

pub mod search;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use search::{NameIndex, chosung, fold_double_consonants};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, DataFormat, PetTable, PetTableLoader, Rank8Entry, Rank8Loader, Rank8Table,
};
