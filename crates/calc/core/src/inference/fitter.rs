//! Growth coefficient search against a floored level-1 snapshot.

use crate::config::CalcConfig;
use crate::decimal::DecimalContext;
use crate::error::{CalcError, Result};
use crate::stats::{HiddenValues, StatVector, Weights, expected_stats};

/// Best growth coefficient found for one hidden-value vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KFit {
    pub k: i64,
    /// Sum of absolute differences between predicted and observed stats.
    pub residual: i64,
    pub exact: bool,
}

/// Searches `k` in `[10, 100]` ascending for the coefficient whose expected
/// stats best reproduce `s0_floor`.
///
/// An exact match beats any inexact one and ends the search, so the lowest
/// exact `k` wins even if larger ones also match. Among inexact candidates
/// the first with the strictly lowest residual is kept.
pub fn fit_growth(
    ctx: &DecimalContext,
    weights: &Weights,
    u: &HiddenValues,
    s0_floor: &StatVector,
) -> Result<KFit> {
    let mut best: Option<KFit> = None;

    for k in CalcConfig::K_MIN..=CalcConfig::K_MAX {
        let predicted = expected_stats(ctx, weights, u, k)?;
        let residual = predicted
            .l1_distance(s0_floor)
            .ok_or(CalcError::invalid("s0", "residual does not fit in an integer"))?;
        let candidate = KFit {
            k,
            residual,
            exact: residual == 0,
        };

        let better = match &best {
            None => true,
            Some(current) => {
                (candidate.exact && !current.exact)
                    || (!current.exact && candidate.residual < current.residual)
            }
        };
        if better {
            best = Some(candidate);
        }
        if candidate.exact {
            break;
        }
    }

    // K_MIN..=K_MAX is never empty
    Ok(best.unwrap_or(KFit {
        k: CalcConfig::K_MIN,
        residual: i64::MAX,
        exact: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(u: HiddenValues, s0: StatVector) -> KFit {
        let ctx = DecimalContext::default();
        fit_growth(&ctx, &Weights::new(&ctx), &u, &s0).unwrap()
    }

    fn expected(u: &HiddenValues, k: i64) -> StatVector {
        let ctx = DecimalContext::default();
        expected_stats(&ctx, &Weights::new(&ctx), u, k).unwrap()
    }

    #[test]
    fn recovers_exact_coefficient() {
        let u = HiddenValues::new(1, 0, -1, 2);
        let s0 = expected(&u, 63);
        let result = fit(u, s0);

        assert!(result.exact);
        assert_eq!(result.residual, 0);
        assert_eq!(expected(&u, result.k), s0);
        assert!(result.k <= 63);
    }

    #[test]
    fn domain_boundaries_are_reachable() {
        let small = HiddenValues::new(2, 2, 2, 2);
        let low = fit(small, expected(&small, 10));
        assert!(low.exact);
        assert_eq!(low.k, 10);

        // hp = 87.5 * k/100 floors to 87 only at k = 100
        let large = HiddenValues::new(10, 10, 10, 10);
        let high = fit(large, expected(&large, 100));
        assert!(high.exact);
        assert_eq!(high.k, 100);
    }

    #[test]
    fn unreachable_snapshot_returns_first_closest() {
        let u = HiddenValues::default();
        let s0 = StatVector::new(500, 1, 1, 1);
        let result = fit(u, s0);

        let residuals: Vec<i64> = (CalcConfig::K_MIN..=CalcConfig::K_MAX)
            .map(|k| expected(&u, k).l1_distance(&s0).unwrap())
            .collect();
        let lowest = *residuals.iter().min().unwrap();
        let first_k = CalcConfig::K_MIN + residuals.iter().position(|r| *r == lowest).unwrap() as i64;

        assert!(!result.exact);
        assert_eq!(result.residual, lowest);
        assert_eq!(result.k, first_k);
        assert!(CalcConfig::is_valid_k(result.k));
    }

    #[test]
    fn lowest_exact_coefficient_wins() {
        // u = -2 floors to all-zero stats for every k below 29
        // (hp = 3.5 * k/100), so the first candidate is kept
        let u = HiddenValues::new(-2, -2, -2, -2);
        let result = fit(u, StatVector::default());
        assert!(result.exact);
        assert_eq!(result.k, 10);
    }
}
