//! Stat formula: hidden values and modifiers to displayed stats.
//!
//! Every stat is first scaled by the growth factor `k / 100`, then the four
//! scaled components are mixed with fixed weights:
//!
//! ```text
//! atk' = floor( iH*0.1 + iA     + iD*0.1 + iG*0.05 )
//! def' = floor( iH*0.1 + iA*0.1 + iD     + iG*0.05 )
//! agi' = floor( iG )
//! hp'  = floor( iH*4   + iA     + iD     + iG )
//! ```
//!
//! The floor is applied once, after the full weighted sum.

use bigdecimal::BigDecimal;

use super::block::{HiddenValues, StatBlock, StatVector};
use crate::decimal::DecimalContext;
use crate::error::Result;

/// Fixed mixing weights, built once per context.
#[derive(Clone, Debug)]
pub struct Weights {
    pub tenth: BigDecimal,
    pub twentieth: BigDecimal,
    pub four: BigDecimal,
}

impl Weights {
    pub fn new(ctx: &DecimalContext) -> Self {
        Self {
            tenth: ctx.exact(1, 1),
            twentieth: ctx.exact(5, 2),
            four: ctx.int(4),
        }
    }
}

/// `k / 100` as an exact decimal.
pub fn growth_factor(ctx: &DecimalContext, k: i64) -> BigDecimal {
    ctx.exact(k, 2)
}

/// Mixes four scaled components into the four unfloored stats.
pub fn weighted_stats(
    ctx: &DecimalContext,
    weights: &Weights,
    scaled: &StatBlock<BigDecimal>,
) -> StatBlock<BigDecimal> {
    let StatBlock { hp, atk, def, agi } = scaled;

    let hp_tenth = ctx.mul(hp, &weights.tenth);
    let agi_twentieth = ctx.mul(agi, &weights.twentieth);

    StatBlock {
        atk: ctx.sum([&hp_tenth, atk, &ctx.mul(def, &weights.tenth), &agi_twentieth]),
        def: ctx.sum([&hp_tenth, &ctx.mul(atk, &weights.tenth), def, &agi_twentieth]),
        agi: agi.clone(),
        hp: ctx.sum([&ctx.mul(hp, &weights.four), atk, def, agi]),
    }
}

/// Floors every component of a weighted stat block.
pub fn floor_stats(ctx: &DecimalContext, stats: &StatBlock<BigDecimal>) -> Result<StatVector> {
    stats.try_map(|stat, value| ctx.floor_i64(value, stat.as_str()))
}

/// Derives the four displayed stats of one modifier combination.
///
/// `base = u + offset + bonus` per stat, scaled by `k / 100`, mixed and
/// floored.
pub fn derive_stats(
    ctx: &DecimalContext,
    u: &HiddenValues,
    offsets: &StatBlock<i64>,
    bonuses: &StatBlock<i64>,
    k: i64,
) -> Result<StatVector> {
    let fac = growth_factor(ctx, k);
    let scaled = StatBlock::from_fn(|stat| {
        let base = ctx.sum([
            &ctx.int(*u.get(stat)),
            &ctx.int(*offsets.get(stat)),
            &ctx.int(*bonuses.get(stat)),
        ]);
        ctx.mul(&base, &fac)
    });
    floor_stats(ctx, &weighted_stats(ctx, &Weights::new(ctx), &scaled))
}

/// Scales `u + 2.5` per stat by `factor`, the expected-average base of a
/// creature before discrete modifiers.
pub fn expected_scaled(
    ctx: &DecimalContext,
    u: &HiddenValues,
    factor: &BigDecimal,
) -> StatBlock<BigDecimal> {
    let half_step = ctx.exact(25, 1);
    u.map(|value| ctx.mul(&ctx.add(&ctx.int(*value), &half_step), factor))
}

/// Floored expected level-1 stats for a hidden-value vector at coefficient `k`.
pub fn expected_stats(ctx: &DecimalContext, weights: &Weights, u: &HiddenValues, k: i64) -> Result<StatVector> {
    let scaled = expected_scaled(ctx, u, &growth_factor(ctx, k));
    floor_stats(ctx, &weighted_stats(ctx, weights, &scaled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn hand_computed_example() {
        let ctx = DecimalContext::default();
        // u = 0, offsets = 0, bonuses (hp, atk, def, agi) = (2, 3, 3, 2), k = 60
        // iH = 1.2, iA = 1.8, iD = 1.8, iG = 1.2
        // atk = 0.12 + 1.8 + 0.18 + 0.06 = 2.16
        // def = 0.12 + 0.18 + 1.8 + 0.06 = 2.16
        // agi = 1.2
        // hp  = 4.8 + 1.8 + 1.8 + 1.2 = 9.6
        let stats = derive_stats(
            &ctx,
            &HiddenValues::default(),
            &StatBlock::default(),
            &StatBlock::new(2, 3, 3, 2),
            60,
        )
        .unwrap();
        assert_eq!(stats, StatVector::new(9, 2, 2, 1));
    }

    #[test]
    fn exact_boundaries_floor_correctly() {
        let ctx = DecimalContext::default();
        // iG = 10 * 0.7 = 7 exactly; binary floats give 6.999...
        let stats = derive_stats(
            &ctx,
            &HiddenValues::default(),
            &StatBlock::default(),
            &StatBlock::new(0, 0, 0, 10),
            70,
        )
        .unwrap();
        assert_eq!(stats.agi, 7);
        // hp = 7, atk = def = 7 * 0.05 = 0.35
        assert_eq!(stats, StatVector::new(7, 0, 0, 7));
    }

    #[test]
    fn negative_bases_floor_downwards() {
        let ctx = DecimalContext::default();
        let u = HiddenValues::new(-3, -3, -3, -3);
        let stats = derive_stats(&ctx, &u, &StatBlock::default(), &StatBlock::new(0, 0, 0, 1), 50).unwrap();
        // iG = -2 * 0.5 = -1, iH = iA = iD = -1.5
        assert_eq!(stats.agi, -1);
        assert_eq!(stats.hp, -10);
    }

    #[test]
    fn oversized_base_is_invalid_not_wrapped() {
        let ctx = DecimalContext::default();
        let u = HiddenValues::new(i64::MAX, 0, 0, 0);
        let err = derive_stats(&ctx, &u, &StatBlock::new(2, 0, 0, 0), &StatBlock::new(10, 0, 0, 0), 100)
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidObservation { field: "hp", .. }));
    }

    #[test]
    fn expected_stats_use_half_step() {
        let ctx = DecimalContext::default();
        let weights = Weights::new(&ctx);
        // (0 + 2.5) * 0.4 = 1 for every stat
        let stats = expected_stats(&ctx, &weights, &HiddenValues::default(), 40).unwrap();
        // atk = 0.1 + 1 + 0.1 + 0.05 = 1.25
        assert_eq!(stats, StatVector::new(7, 1, 1, 1));
    }
}
