//! Runtime orchestration for the growth calculator.
//!
//! This crate wires the read-only catalog, the calculation rules and the
//! enumeration worker into a cohesive runtime API. Consumers embed
//! [`Runtime`] and interact with it through [`CalculatorHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`catalog`] loads and shares the lookup tables
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod catalog;
pub mod runtime;

mod workers;

pub use api::{CalculationReport, CalculatorHandle, EnumerationRequest, Result, RuntimeError};
pub use catalog::{Catalog, CatalogLoader, LoadedCatalog, TableSource, default_cache_dir};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
