//! Cloneable façade for issuing calculations to the runtime.
//!
//! [`CalculatorHandle`] hides channel plumbing. Parameter resolution runs
//! synchronously on the caller; enumeration is dispatched to the worker and
//! awaited.
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use calc_core::{
    CalcConfig, DecimalContext, EnumerationResult, ParamSource, ResolvedParams, StatVector,
};

use super::errors::{Result, RuntimeError};
use super::types::{CalculationReport, EnumerationRequest};
use crate::catalog::Catalog;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
///
/// Each clone is an independent caller. Enumeration takes `&mut self`, so a
/// caller can only have one request in flight at a time.
#[derive(Clone)]
pub struct CalculatorHandle {
    command_tx: mpsc::Sender<Command>,
    catalog: Catalog,
    config: CalcConfig,
}

impl CalculatorHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, catalog: Catalog, config: CalcConfig) -> Self {
        Self {
            command_tx,
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Known or inferred growth parameters of a named pet.
    pub fn resolve(&self, name: &str) -> Result<ResolvedParams> {
        let record = self.catalog.get(name).ok_or_else(|| RuntimeError::UnknownPet {
            name: name.to_string(),
        })?;
        let ctx = DecimalContext::from_config(&self.config)?;
        let resolved = record.resolve(&ctx)?;

        match &resolved.source {
            ParamSource::Known => {
                debug!(target: "runtime::handle", pet = name, params = %resolved.params, "Using known parameters");
            }
            ParamSource::Inferred(candidate) => {
                info!(
                    target: "runtime::handle",
                    pet = name,
                    params = %resolved.params,
                    exponent = candidate.exponent,
                    exact = candidate.exact_fit,
                    score = %candidate.score,
                    "Inferred parameters"
                );
            }
        }
        Ok(resolved)
    }

    /// Runs one enumeration on the worker and waits for the result.
    pub async fn enumerate(&mut self, request: EnumerationRequest) -> Result<EnumerationResult> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Enumerate {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Resolves a named pet and enumerates against `obs`.
    ///
    /// Without an explicit observation the floored level-1 snapshot is used.
    pub async fn calculate(
        &mut self,
        name: &str,
        obs: Option<StatVector>,
    ) -> Result<CalculationReport> {
        let resolved = self.resolve(name)?;

        let obs = match obs {
            Some(obs) => obs,
            None => {
                let ctx = DecimalContext::from_config(&self.config)?;
                self.catalog
                    .get(name)
                    .and_then(|record| record.default_observation(&ctx))
                    .ok_or_else(|| RuntimeError::MissingObservation {
                        name: name.to_string(),
                    })?
            }
        };

        let request = EnumerationRequest {
            params: resolved.params,
            obs,
        };
        let result = self.enumerate(request).await?;
        let guaranteed_rank8 = self
            .catalog
            .rank8(name)
            .is_some_and(|entry| entry.contains(&obs));

        Ok(CalculationReport {
            name: name.to_string(),
            resolved,
            obs,
            result,
            guaranteed_rank8,
        })
    }
}
