//! Creature records and parameter resolution.
//!
//! A record either carries known growth parameters or a pair of snapshots
//! (`S0` at level 1, `SG` at a high level) from which they are inferred.

use bigdecimal::{BigDecimal, ToPrimitive};

use crate::decimal::DecimalContext;
use crate::error::{CalcError, Result};
use crate::inference::{Candidate, Inference};
use crate::params::GrowthParams;
use crate::stats::{HiddenValues, StatBlock, StatVector};

/// Possibly fractional stat snapshot. Missing components are `NaN`.
pub type Snapshot = StatBlock<f64>;

impl StatBlock<f64> {
    /// Converts every component to an exact decimal.
    pub fn to_decimal(&self, ctx: &DecimalContext) -> Result<StatBlock<BigDecimal>> {
        self.try_map(|stat, value| ctx.from_f64(*value, stat.as_str()))
    }

    /// Nearest-float view of a decimal stat block.
    pub fn from_decimal(values: &StatBlock<BigDecimal>) -> Self {
        values.map(|value| value.to_f64().unwrap_or(f64::NAN))
    }

    pub fn from_stats(values: &StatVector) -> Self {
        values.map(|value| *value as f64)
    }

    /// Component-wise floor, computed on the exact decimal value.
    pub fn floor(&self, ctx: &DecimalContext) -> Result<StatVector> {
        self.try_map(|stat, value| {
            let exact = ctx.from_f64(*value, stat.as_str())?;
            ctx.floor_i64(&exact, stat.as_str())
        })
    }
}

/// Stat block as it appears in data files, with every component optional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawStats {
    pub hp: Option<f64>,
    pub atk: Option<f64>,
    pub def: Option<f64>,
    pub agi: Option<f64>,
}

impl RawStats {
    pub const fn new(hp: f64, atk: f64, def: f64, agi: f64) -> Self {
        Self {
            hp: Some(hp),
            atk: Some(atk),
            def: Some(def),
            agi: Some(agi),
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.hp.unwrap_or(f64::NAN),
            self.atk.unwrap_or(f64::NAN),
            self.def.unwrap_or(f64::NAN),
            self.agi.unwrap_or(f64::NAN),
        )
    }

    /// Integer view; `None` unless every component is present, finite and integral.
    pub fn to_integers(&self) -> Option<StatVector> {
        let snapshot = self.to_snapshot();
        let integral = |value: f64| {
            (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                .then_some(value as i64)
        };
        Some(StatVector::new(
            integral(snapshot.hp)?,
            integral(snapshot.atk)?,
            integral(snapshot.def)?,
            integral(snapshot.agi)?,
        ))
    }
}

impl From<Snapshot> for RawStats {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot.hp, snapshot.atk, snapshot.def, snapshot.agi)
    }
}

/// One creature as stored in the data table.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PetRecord {
    pub s0: Option<RawStats>,
    pub sg: Option<RawStats>,
    pub k: Option<f64>,
    pub u: Option<RawStats>,
}

/// Where resolved parameters came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamSource {
    /// Taken from the record as is.
    Known,
    /// Inferred from the snapshot pair.
    Inferred(Box<Candidate>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedParams {
    pub params: GrowthParams,
    pub source: ParamSource,
}

impl ResolvedParams {
    pub const fn is_inferred(&self) -> bool {
        matches!(self.source, ParamSource::Inferred(_))
    }
}

impl PetRecord {
    /// Known `(k, u)` when `k` and all four `u` components are finite integers.
    pub fn known_params(&self) -> Option<GrowthParams> {
        let k = self
            .k
            .filter(|k| k.is_finite() && k.fract() == 0.0 && k.abs() < i64::MAX as f64)?
            as i64;
        let u: HiddenValues = self.u.as_ref()?.to_integers()?;
        Some(GrowthParams::new(k, u))
    }

    /// Both snapshots, when present.
    pub fn snapshots(&self) -> Option<(Snapshot, Snapshot)> {
        Some((self.s0?.to_snapshot(), self.sg?.to_snapshot()))
    }

    /// Floored `S0`, the observation used when the caller supplies none.
    pub fn default_observation(&self, ctx: &DecimalContext) -> Option<StatVector> {
        self.s0?.to_snapshot().floor(ctx).ok()
    }

    /// Returns the known parameters, or infers them from the snapshot pair.
    ///
    /// Fails with [`CalcError::MalformedRecord`] before any computation when
    /// neither is available, and with [`CalcError::NoCandidateFound`] when
    /// every exponent candidate fails.
    pub fn resolve(&self, ctx: &DecimalContext) -> Result<ResolvedParams> {
        if let Some(params) = self.known_params() {
            return Ok(ResolvedParams {
                params,
                source: ParamSource::Known,
            });
        }

        let (s0, sg) = self.snapshots().ok_or(CalcError::MalformedRecord)?;
        let outcome = Inference::new(*ctx).run(&s0, &sg)?;
        Ok(ResolvedParams {
            params: outcome.best.params(),
            source: ParamSource::Inferred(Box::new(outcome.best)),
        })
    }
}
