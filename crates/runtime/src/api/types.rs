//! Request and report types exchanged with the runtime.
use calc_core::{EnumerationResult, GrowthParams, HiddenValues, ResolvedParams, StatVector};
use serde::{Deserialize, Serialize};

/// One enumeration request: growth parameters plus the observed stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationRequest {
    pub params: GrowthParams,
    pub obs: StatVector,
}

impl EnumerationRequest {
    pub const fn new(k: i64, u: HiddenValues, obs: StatVector) -> Self {
        Self {
            params: GrowthParams::new(k, u),
            obs,
        }
    }
}

/// Outcome of a full calculation for a named pet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationReport {
    pub name: String,
    pub resolved: ResolvedParams,
    pub obs: StatVector,
    pub result: EnumerationResult,
    /// The observation is listed in the pet's guaranteed rank-8 table.
    pub guaranteed_rank8: bool,
}

impl CalculationReport {
    pub const fn params(&self) -> &GrowthParams {
        &self.resolved.params
    }
}
