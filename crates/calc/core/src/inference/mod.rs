//! Growth parameter inference from two snapshots.
//!
//! For every exponent candidate the [`solver`] recovers hidden values from
//! the high-level snapshot `SG`, the [`fitter`] searches the growth
//! coefficient that reproduces the floored level-1 snapshot `S0`, and the
//! pair is scored:
//!
//! ```text
//! score = (0 if exact else 1000) + residual * 10 + snapshot_error
//! ```
//!
//! The lowest score wins; on ties the earlier exponent is kept. Exponents
//! whose solve fails are skipped.

pub mod fitter;
pub mod solver;

use bigdecimal::BigDecimal;

use crate::config::CalcConfig;
use crate::decimal::DecimalContext;
use crate::error::{CalcError, Result};
use crate::params::GrowthParams;
use crate::record::Snapshot;
use crate::stats::{HiddenValues, StatVector, Weights};

pub use fitter::{KFit, fit_growth};
pub use solver::{LinearSolution, solve_hidden_values};

const EXPONENT_COUNT: usize =
    ((CalcConfig::EXPONENT_MAX - CalcConfig::EXPONENT_MIN) / CalcConfig::EXPONENT_STEP + 1) as usize;

/// Exponent candidates, tried from the largest down.
pub const EXPONENT_CANDIDATES: [u32; EXPONENT_COUNT] = {
    let mut values = [0u32; EXPONENT_COUNT];
    let mut i = 0;
    while i < EXPONENT_COUNT {
        values[i] = CalcConfig::EXPONENT_MAX - i as u32 * CalcConfig::EXPONENT_STEP;
        i += 1;
    }
    values
};

const INEXACT_PENALTY: i64 = 1000;
const RESIDUAL_WEIGHT: i64 = 10;

/// One scored `(k, u)` candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub k: i64,
    pub u: HiddenValues,
    pub exponent: u32,
    pub snapshot_error: BigDecimal,
    pub fit_residual: i64,
    pub exact_fit: bool,
    pub score: BigDecimal,
}

impl Candidate {
    pub const fn params(&self) -> GrowthParams {
        GrowthParams::new(self.k, self.u)
    }
}

/// An exponent that produced no candidate, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedExponent {
    pub exponent: u32,
    pub error: CalcError,
}

/// Best candidate plus the exponents that were skipped on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferenceOutcome {
    pub best: Candidate,
    pub skipped: Vec<SkippedExponent>,
}

/// Inference driver bound to a decimal context.
#[derive(Clone, Debug)]
pub struct Inference {
    ctx: DecimalContext,
    weights: Weights,
}

impl Inference {
    pub fn new(ctx: DecimalContext) -> Self {
        Self {
            weights: Weights::new(&ctx),
            ctx,
        }
    }

    /// Scores one exponent against the floored level-1 snapshot.
    pub fn candidate(&self, s0_floor: &StatVector, sg: &Snapshot, exponent: u32) -> Result<Candidate> {
        let solution = solve_hidden_values(&self.ctx, &self.weights, sg, exponent)?;
        let fit = fit_growth(&self.ctx, &self.weights, &solution.u, s0_floor)?;

        let ctx = &self.ctx;
        let penalty = ctx.int(if fit.exact { 0 } else { INEXACT_PENALTY });
        let weighted = ctx.mul(&ctx.int(fit.residual), &ctx.int(RESIDUAL_WEIGHT));
        let score = ctx.sum([&penalty, &weighted, &solution.snapshot_error]);

        Ok(Candidate {
            k: fit.k,
            u: solution.u,
            exponent,
            snapshot_error: solution.snapshot_error,
            fit_residual: fit.residual,
            exact_fit: fit.exact,
            score,
        })
    }

    /// Tries every exponent and keeps the minimum-score candidate.
    pub fn run(&self, s0: &Snapshot, sg: &Snapshot) -> Result<InferenceOutcome> {
        let s0_floor = s0
            .floor(&self.ctx)
            .map_err(|_| CalcError::NoCandidateFound)?;

        let mut best: Option<Candidate> = None;
        let mut skipped = Vec::new();

        for exponent in EXPONENT_CANDIDATES {
            match self.candidate(&s0_floor, sg, exponent) {
                Ok(candidate) => {
                    if best.as_ref().is_none_or(|current| candidate.score < current.score) {
                        best = Some(candidate);
                    }
                }
                Err(error) => skipped.push(SkippedExponent { exponent, error }),
            }
        }

        best.map(|best| InferenceOutcome { best, skipped })
            .ok_or(CalcError::NoCandidateFound)
    }
}

/// Infers `(k, u)` from a level-1 snapshot and a high-level snapshot.
pub fn infer_params(config: &CalcConfig, s0: &Snapshot, sg: &Snapshot) -> Result<GrowthParams> {
    let ctx = DecimalContext::from_config(config)?;
    Inference::new(ctx)
        .run(s0, sg)
        .map(|outcome| outcome.best.params())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::solver::{exponent_factor, reconstruct_snapshot};
    use crate::stats::expected_stats;

    fn synthetic(u: HiddenValues, k: i64, exponent: u32) -> (Snapshot, Snapshot) {
        let ctx = DecimalContext::default();
        let weights = Weights::new(&ctx);
        let s0 = expected_stats(&ctx, &weights, &u, k).unwrap();
        let sg = reconstruct_snapshot(&ctx, &weights, &u, &exponent_factor(&ctx, exponent));
        (Snapshot::from_stats(&s0), Snapshot::from_decimal(&sg))
    }

    #[test]
    fn exponent_candidates_span_range() {
        assert_eq!(EXPONENT_CANDIDATES.len(), 29);
        assert_eq!(EXPONENT_CANDIDATES[0], 575);
        assert_eq!(EXPONENT_CANDIDATES[28], 435);
        assert!(EXPONENT_CANDIDATES.windows(2).all(|w| w[0] - w[1] == 5));
    }

    #[test]
    fn round_trip_recovers_params() {
        let ctx = DecimalContext::default();
        let weights = Weights::new(&ctx);

        for (u, k, exponent) in [
            (HiddenValues::new(0, 0, 0, 0), 60, 500),
            (HiddenValues::new(2, -1, 1, -2), 85, 455),
            (HiddenValues::new(-2, 2, 0, 1), 25, 575),
        ] {
            let (s0, sg) = synthetic(u, k, exponent);
            let outcome = Inference::new(ctx).run(&s0, &sg).unwrap();

            assert_eq!(outcome.best.u, u, "exponent {exponent}");
            assert!(outcome.best.exact_fit);
            let refit = fit_growth(&ctx, &weights, &outcome.best.u, &s0.floor(&ctx).unwrap()).unwrap();
            assert_eq!(refit.residual, 0);
            assert_eq!(refit.k, outcome.best.k);
        }
    }

    #[test]
    fn best_candidate_has_minimum_score() {
        let ctx = DecimalContext::default();
        let (s0, sg) = synthetic(HiddenValues::new(1, 1, 0, 0), 70, 520);
        let inference = Inference::new(ctx);
        let outcome = inference.run(&s0, &sg).unwrap();
        let s0_floor = s0.floor(&ctx).unwrap();

        for exponent in EXPONENT_CANDIDATES {
            let other = inference.candidate(&s0_floor, &sg, exponent).unwrap();
            assert!(outcome.best.score <= other.score);
        }
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn malformed_snapshots_fail() {
        let config = CalcConfig::default();
        let good = Snapshot::new(10.0, 3.0, 3.0, 2.0);
        let bad = Snapshot::new(f64::NAN, 3.0, 3.0, 2.0);

        assert_eq!(
            infer_params(&config, &good, &bad),
            Err(CalcError::NoCandidateFound)
        );
        assert_eq!(
            infer_params(&config, &bad, &good),
            Err(CalcError::NoCandidateFound)
        );
    }

    #[test]
    fn huge_level_one_snapshot_scores_without_overflow() {
        let ctx = DecimalContext::default();
        let sg = Snapshot::new(0.88, 0.16, 0.16, 0.13);
        let s0 = Snapshot::new(1e18, 1.0, 1.0, 1.0);

        let outcome = Inference::new(ctx).run(&s0, &sg).unwrap();
        assert!(!outcome.best.exact_fit);
        assert!(outcome.best.fit_residual > 999_999_999_999_000_000);
        // residual * 10 is past i64::MAX
        assert!(outcome.best.score > ctx.int(i64::MAX));
    }

    #[test]
    fn residual_overflow_skips_exponent() {
        let ctx = DecimalContext::default();
        let sg = Snapshot::new(0.88, 0.16, 0.16, 0.13);
        let s0 = Snapshot::new(i64::MIN as f64, 1.0, 1.0, 1.0);
        let s0_floor = s0.floor(&ctx).unwrap();
        assert_eq!(s0_floor.hp, i64::MIN);

        let err = Inference::new(ctx).candidate(&s0_floor, &sg, 500).unwrap_err();
        assert!(matches!(err, CalcError::InvalidObservation { field: "s0", .. }));
        assert_eq!(Inference::new(ctx).run(&s0, &sg), Err(CalcError::NoCandidateFound));
    }

    #[test]
    fn skipped_exponents_are_reported() {
        let ctx = DecimalContext::default();
        let sg = Snapshot::new(f64::INFINITY, 1.0, 1.0, 1.0);
        let s0 = Snapshot::new(7.0, 1.0, 1.0, 1.0);

        assert_eq!(Inference::new(ctx).run(&s0, &sg), Err(CalcError::NoCandidateFound));
        let s0_floor = s0.floor(&ctx).unwrap();
        let err = Inference::new(ctx).candidate(&s0_floor, &sg, 500).unwrap_err();
        assert!(err.severity().is_recoverable());
    }
}
