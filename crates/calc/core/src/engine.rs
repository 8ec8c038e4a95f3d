//! Exhaustive enumeration of the modifier space.
//!
//! [`Enumerator`] walks every valid [`ModifierTuple`], derives the four stats
//! with the exact-decimal formula and counts the tuples that reproduce an
//! observed stat vector. Matches are grouped by base rank.
//!
//! Per-stat weighted contributions are computed once per request: each stat
//! only ever takes 15 distinct base values (`u + offset + bonus`), so the
//! inner loop reduces to a handful of decimal additions. The agi check needs
//! no addition at all and runs first.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

use crate::config::CalcConfig;
use crate::decimal::DecimalContext;
use crate::error::Result;
use crate::params::GrowthParams;
use crate::stats::{
    ModifierIter, ModifierSpace, ModifierTuple, Stat, StatBlock, StatVector, Weights,
    derive_stats, growth_factor,
};

const BASE_SPAN: usize = ((CalcConfig::OFFSET_MAX - CalcConfig::OFFSET_MIN)
    + (CalcConfig::BONUS_MAX - CalcConfig::BONUS_MIN)
    + 1) as usize;

/// Aggregated outcome of one enumeration request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumerationResult {
    /// Tuples whose derived stats equal the observation.
    pub matches: u64,
    /// Matches with base rank 8.
    pub rank8: u64,
    /// Match count per base rank; only ranks with at least one match appear.
    pub dist: BTreeMap<i64, u64>,
    /// Raw tuples visited, including those rejected by the bonus-sum filter.
    pub evaluated: u64,
}

impl EnumerationResult {
    fn record(&mut self, tuple: &ModifierTuple) {
        let rank = tuple.base_rank();
        self.matches += 1;
        *self.dist.entry(rank).or_insert(0) += 1;
        if rank == CalcConfig::PERFECT_RANK {
            self.rank8 += 1;
        }
    }

    /// Match count for one base rank.
    pub fn count_for_rank(&self, rank: i64) -> u64 {
        self.dist.get(&rank).copied().unwrap_or(0)
    }
}

/// Precomputed products of one scaled base value.
#[derive(Clone, Debug)]
struct Contribution {
    scaled: BigDecimal,
    tenth: BigDecimal,
    twentieth: BigDecimal,
    four: BigDecimal,
    floor: BigDecimal,
}

/// Enumeration engine bound to one set of growth parameters.
#[derive(Clone, Debug)]
pub struct Enumerator {
    ctx: DecimalContext,
    params: GrowthParams,
    table: StatBlock<Vec<Contribution>>,
}

impl Enumerator {
    pub fn new(ctx: DecimalContext, params: GrowthParams) -> Self {
        let weights = Weights::new(&ctx);
        let fac = growth_factor(&ctx, params.k);
        let lowest = CalcConfig::OFFSET_MIN + CalcConfig::BONUS_MIN;

        let table = StatBlock::from_fn(|stat| {
            (0..BASE_SPAN as i64)
                .map(|step| {
                    let base = ctx.add(&ctx.int(*params.u.get(stat)), &ctx.int(lowest + step));
                    let scaled = ctx.mul(&base, &fac);
                    Contribution {
                        tenth: ctx.mul(&scaled, &weights.tenth),
                        twentieth: ctx.mul(&scaled, &weights.twentieth),
                        four: ctx.mul(&scaled, &weights.four),
                        floor: ctx.floor(&scaled),
                        scaled,
                    }
                })
                .collect()
        });

        Self { ctx, params, table }
    }

    pub const fn params(&self) -> &GrowthParams {
        &self.params
    }

    /// Derives the stats of one tuple through the plain formula.
    pub fn derive(&self, tuple: &ModifierTuple) -> Result<StatVector> {
        derive_stats(
            &self.ctx,
            &self.params.u,
            &tuple.offsets,
            &tuple.bonuses,
            self.params.k,
        )
    }

    /// Lazily yields every tuple whose derived stats equal `obs`.
    pub fn matching(&self, obs: &StatVector) -> Matches<'_> {
        Matches {
            enumerator: self,
            target: obs.map(|value| self.ctx.int(*value)),
            space: ModifierSpace::new().iter(),
        }
    }

    /// Counts matches over the whole space and groups them by base rank.
    pub fn enumerate(&self, obs: &StatVector) -> EnumerationResult {
        let mut result = EnumerationResult::default();
        let mut matches = self.matching(obs);
        for tuple in matches.by_ref() {
            result.record(&tuple);
        }
        result.evaluated = matches.visited();
        result
    }

    fn contribution(&self, stat: Stat, tuple: &ModifierTuple) -> &Contribution {
        let step = tuple.offsets.get(stat) - CalcConfig::OFFSET_MIN + tuple.bonuses.get(stat)
            - CalcConfig::BONUS_MIN;
        &self.table.get(stat)[step as usize]
    }

    fn is_match(&self, tuple: &ModifierTuple, target: &StatBlock<BigDecimal>) -> bool {
        let ctx = &self.ctx;
        let h = self.contribution(Stat::Hp, tuple);
        let a = self.contribution(Stat::Atk, tuple);
        let d = self.contribution(Stat::Def, tuple);
        let g = self.contribution(Stat::Agi, tuple);

        g.floor == target.agi
            && ctx.floor(&ctx.sum([&h.tenth, &a.scaled, &d.tenth, &g.twentieth])) == target.atk
            && ctx.floor(&ctx.sum([&h.tenth, &a.tenth, &d.scaled, &g.twentieth])) == target.def
            && ctx.floor(&ctx.sum([&h.four, &a.scaled, &d.scaled, &g.scaled])) == target.hp
    }
}

/// Iterator over matching tuples; see [`Enumerator::matching`].
#[derive(Clone, Debug)]
pub struct Matches<'a> {
    enumerator: &'a Enumerator,
    target: StatBlock<BigDecimal>,
    space: ModifierIter,
}

impl Matches<'_> {
    /// Raw tuples visited so far.
    pub const fn visited(&self) -> u64 {
        self.space.visited()
    }
}

impl Iterator for Matches<'_> {
    type Item = ModifierTuple;

    fn next(&mut self) -> Option<Self::Item> {
        let Self {
            enumerator,
            target,
            space,
        } = self;
        space.find(|tuple| enumerator.is_match(tuple, target))
    }
}

/// Enumerates the modifier space for `params` against `obs`.
///
/// Fails only when the decimal context cannot be built from `config`.
pub fn enumerate(
    config: &CalcConfig,
    params: &GrowthParams,
    obs: &StatVector,
) -> Result<EnumerationResult> {
    let ctx = DecimalContext::from_config(config)?;
    Ok(Enumerator::new(ctx, *params).enumerate(obs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::stats::HiddenValues;

    fn enumerator(k: i64, u: HiddenValues) -> Enumerator {
        Enumerator::new(DecimalContext::default(), GrowthParams::new(k, u))
    }

    #[test]
    fn concrete_scenario_rank_zero() {
        let engine = enumerator(60, HiddenValues::default());
        let generator = ModifierTuple::new(StatBlock::default(), 3, 3, 2).unwrap();
        assert_eq!(generator.bonuses, StatBlock::new(2, 3, 3, 2));

        let obs = engine.derive(&generator).unwrap();
        let result = engine.enumerate(&obs);

        assert!(result.matches >= 1);
        assert!(result.count_for_rank(0) >= 1);
        assert_eq!(result.evaluated, CalcConfig::RAW_SPACE);
        assert_eq!(result.dist.values().sum::<u64>(), result.matches);
        assert_eq!(result.count_for_rank(8), result.rank8);
    }

    #[test]
    fn generating_tuple_is_among_matches() {
        let engine = enumerator(37, HiddenValues::new(1, -2, 0, 2));
        let generator = ModifierTuple::new(StatBlock::new(1, -1, 2, 0), 4, 1, 3).unwrap();
        let obs = engine.derive(&generator).unwrap();

        assert!(engine.matching(&obs).any(|tuple| tuple == generator));
    }

    #[test]
    fn perfect_rank_is_counted() {
        let engine = enumerator(100, HiddenValues::new(2, 2, 2, 2));
        let generator = ModifierTuple::new(StatBlock::new(2, 2, 2, 2), 0, 0, 10).unwrap();
        let obs = engine.derive(&generator).unwrap();
        let result = engine.enumerate(&obs);

        assert!(result.rank8 >= 1);
        assert_eq!(result.dist.get(&8), Some(&result.rank8));
        assert!(result.dist.keys().all(|rank| (-8..=8).contains(rank)));
    }

    #[test]
    fn unreachable_observation_has_no_matches() {
        let engine = enumerator(50, HiddenValues::default());
        let result = engine.enumerate(&StatVector::new(999, 999, 999, 999));

        assert_eq!(result.matches, 0);
        assert_eq!(result.rank8, 0);
        assert!(result.dist.is_empty());
        assert_eq!(result.evaluated, CalcConfig::RAW_SPACE);
    }

    #[test]
    fn extreme_hidden_values_do_not_overflow() {
        let engine = enumerator(60, HiddenValues::new(i64::MAX, 0, 0, 0));
        let result = engine.enumerate(&StatVector::default());
        assert_eq!(result.matches, 0);
        assert_eq!(result.evaluated, CalcConfig::RAW_SPACE);

        let tuple = ModifierSpace::new().iter().next().unwrap();
        assert!(matches!(
            engine.derive(&tuple),
            Err(CalcError::InvalidObservation { field: "hp", .. })
        ));
    }

    #[test]
    fn fast_path_agrees_with_plain_formula() {
        let engine = enumerator(73, HiddenValues::new(-1, 2, 1, 0));
        let obs = StatVector::new(30, 7, 6, 5);
        let target = obs.map(|value| engine.ctx.int(*value));

        for tuple in ModifierSpace::new().iter().step_by(97) {
            let plain = engine.derive(&tuple).unwrap() == obs;
            assert_eq!(engine.is_match(&tuple, &target), plain, "{tuple:?}");
        }
    }

    #[test]
    fn deterministic_results() {
        let params = GrowthParams::new(45, HiddenValues::new(0, 1, -1, 2));
        let obs = StatVector::new(12, 3, 2, 3);
        let config = CalcConfig::default();

        let first = enumerate(&config, &params, &obs).unwrap();
        let second = enumerate(&config, &params, &obs).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn result_json_keys_ranks() {
        let engine = enumerator(60, HiddenValues::default());
        let result = engine.enumerate(&StatVector::new(9, 2, 2, 1));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["matches"], 134);
        assert_eq!(json["dist"]["0"], 85);
        assert_eq!(json["dist"]["2"], 49);

        let back: EnumerationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn low_precision_is_rejected() {
        let params = GrowthParams::new(45, HiddenValues::default());
        let result = enumerate(
            &CalcConfig::with_precision(16),
            &params,
            &StatVector::default(),
        );
        assert!(matches!(result, Err(CalcError::ArithmeticUnavailable { .. })));
    }
}
