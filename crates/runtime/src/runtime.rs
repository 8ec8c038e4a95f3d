//! High-level runtime orchestrator.
//!
//! The runtime owns the enumeration worker, wires up the command channel and
//! exposes a builder-based API for clients to run calculations.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use calc_core::CalcConfig;

use crate::api::{CalculatorHandle, Result, RuntimeError};
use crate::catalog::Catalog;
use crate::workers::{Command, EnumerationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub calc: CalcConfig,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            calc: CalcConfig::default(),
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates calculations.
///
/// Runtime owns the worker; [`CalculatorHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: CalculatorHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> CalculatorHandle {
        self.handle.clone()
    }

    pub fn catalog(&self) -> &Catalog {
        self.handle.catalog()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Waits for in-flight enumerations; handles cloned from this runtime
    /// must be dropped first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Catalog>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the lookup tables; an empty catalog is used otherwise.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.unwrap_or_default();
        let buffer = self.config.command_buffer_size.max(1);

        let (command_tx, command_rx) = mpsc::channel::<Command>(buffer);
        let handle = CalculatorHandle::new(command_tx, catalog, self.config.calc.clone());

        let worker = EnumerationWorker::new(self.config.calc, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        debug!(target: "runtime", pets = handle.catalog().len(), "Runtime built");

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
