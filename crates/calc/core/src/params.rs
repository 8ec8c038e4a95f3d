//! Growth parameters of a single creature.

use crate::config::CalcConfig;
use crate::stats::HiddenValues;

/// Growth coefficient `k` and hidden values `u`.
///
/// Produced either from a data record or by the inference solver; scoped to
/// one calculation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthParams {
    pub k: i64,
    pub u: HiddenValues,
}

impl GrowthParams {
    pub const fn new(k: i64, u: HiddenValues) -> Self {
        Self { k, u }
    }

    /// Returns true if `k` lies inside `[10, 100]`.
    pub const fn has_valid_k(&self) -> bool {
        CalcConfig::is_valid_k(self.k)
    }
}

impl core::fmt::Display for GrowthParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "k={} u={}", self.k, self.u)
    }
}
