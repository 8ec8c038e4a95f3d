//! The discrete modifier space searched by the enumeration engine.
//!
//! A [`ModifierTuple`] is one base offset and one bonus level per stat. The
//! full space is the Cartesian product of four offsets in `[-2, 2]` and three
//! free bonus levels in `[0, 10]`; the fourth (hp) bonus level is derived so
//! the four sum to [`CalcConfig::BONUS_TOTAL`], and tuples where it falls
//! outside `[0, 10]` are filtered out.

use core::iter::FusedIterator;

use super::block::StatBlock;
use crate::config::CalcConfig;

const OFFSET_SPAN: u64 = (CalcConfig::OFFSET_MAX - CalcConfig::OFFSET_MIN + 1) as u64;
const BONUS_SPAN: u64 = (CalcConfig::BONUS_MAX - CalcConfig::BONUS_MIN + 1) as u64;
const BONUS_CELLS: u64 = BONUS_SPAN * BONUS_SPAN * BONUS_SPAN;

/// One point of the modifier space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTuple {
    /// Innate rank contribution per stat, each in `[-2, 2]`.
    pub offsets: StatBlock<i64>,
    /// Bonus level per stat, each in `[0, 10]`, summing to 10.
    pub bonuses: StatBlock<i64>,
}

impl ModifierTuple {
    /// Builds a tuple, deriving the hp bonus from the other three.
    ///
    /// Returns `None` when the derived level falls outside `[0, 10]`.
    pub fn new(offsets: StatBlock<i64>, atk_bonus: i64, def_bonus: i64, agi_bonus: i64) -> Option<Self> {
        let hp_bonus = CalcConfig::BONUS_TOTAL
            .checked_sub(atk_bonus)?
            .checked_sub(def_bonus)?
            .checked_sub(agi_bonus)?;
        if !(CalcConfig::BONUS_MIN..=CalcConfig::BONUS_MAX).contains(&hp_bonus) {
            return None;
        }
        Some(Self {
            offsets,
            bonuses: StatBlock::new(hp_bonus, atk_bonus, def_bonus, agi_bonus),
        })
    }

    /// Sum of the four base offsets, in `[-8, 8]`.
    pub fn base_rank(&self) -> i64 {
        self.offsets.sum()
    }

    pub fn is_perfect(&self) -> bool {
        self.base_rank() == CalcConfig::PERFECT_RANK
    }

    /// Decodes a raw index in `0..RAW_SPACE`.
    ///
    /// Offsets vary slowest in `atk, def, agi, hp` order, then the atk, def
    /// and agi bonus levels.
    fn decode(index: u64) -> Option<Self> {
        let offset_cell = index / BONUS_CELLS;
        let bonus_cell = index % BONUS_CELLS;

        let offset = |cell: u64| cell as i64 + CalcConfig::OFFSET_MIN;
        let bonus = |cell: u64| cell as i64 + CalcConfig::BONUS_MIN;

        let offsets = StatBlock {
            atk: offset(offset_cell / (OFFSET_SPAN * OFFSET_SPAN * OFFSET_SPAN)),
            def: offset(offset_cell / (OFFSET_SPAN * OFFSET_SPAN) % OFFSET_SPAN),
            agi: offset(offset_cell / OFFSET_SPAN % OFFSET_SPAN),
            hp: offset(offset_cell % OFFSET_SPAN),
        };

        Self::new(
            offsets,
            bonus(bonus_cell / (BONUS_SPAN * BONUS_SPAN)),
            bonus(bonus_cell / BONUS_SPAN % BONUS_SPAN),
            bonus(bonus_cell % BONUS_SPAN),
        )
    }
}

/// The whole modifier space as a restartable sequence of valid tuples.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModifierSpace;

impl ModifierSpace {
    pub const fn new() -> Self {
        Self
    }

    /// Raw tuples visited before filtering.
    pub const fn raw_len(&self) -> u64 {
        OFFSET_SPAN.pow(4) * BONUS_CELLS
    }

    pub fn iter(&self) -> ModifierIter {
        ModifierIter {
            next_index: 0,
            end: self.raw_len(),
        }
    }
}

impl IntoIterator for ModifierSpace {
    type Item = ModifierTuple;
    type IntoIter = ModifierIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over valid tuples; also reports how many raw tuples it has visited.
#[derive(Clone, Debug)]
pub struct ModifierIter {
    next_index: u64,
    end: u64,
}

impl ModifierIter {
    /// Raw tuples visited so far, including those rejected by the bonus filter.
    pub const fn visited(&self) -> u64 {
        self.next_index
    }
}

impl Iterator for ModifierIter {
    type Item = ModifierTuple;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.end {
            let index = self.next_index;
            self.next_index += 1;
            if let Some(tuple) = ModifierTuple::decode(index) {
                return Some(tuple);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.end - self.next_index) as usize))
    }
}

impl FusedIterator for ModifierIter {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn raw_and_valid_sizes() {
        let space = ModifierSpace::new();
        assert_eq!(space.raw_len(), CalcConfig::RAW_SPACE);

        let mut iter = space.iter();
        let valid = iter.by_ref().count() as u64;
        assert_eq!(valid, CalcConfig::VALID_SPACE);
        assert_eq!(iter.visited(), CalcConfig::RAW_SPACE);
    }

    #[test]
    fn every_tuple_respects_ranges() {
        for tuple in ModifierSpace::new() {
            assert_eq!(tuple.bonuses.sum(), CalcConfig::BONUS_TOTAL);
            for (_, bonus) in tuple.bonuses.iter() {
                assert!((0..=10).contains(bonus));
            }
            for (_, offset) in tuple.offsets.iter() {
                assert!((-2..=2).contains(offset));
            }
            assert!((-8..=8).contains(&tuple.base_rank()));
        }
    }

    #[test]
    fn space_is_restartable_and_unique() {
        let space = ModifierSpace::new();
        let first: Vec<_> = space.iter().take(50).collect();
        let again: Vec<_> = space.iter().take(50).collect();
        assert_eq!(first, again);

        let unique: HashSet<_> = space.iter().collect();
        assert_eq!(unique.len() as u64, CalcConfig::VALID_SPACE);
    }

    #[test]
    fn out_of_range_bonuses_are_rejected() {
        assert!(ModifierTuple::new(StatBlock::default(), 3, 3, 2).is_some());
        assert!(ModifierTuple::new(StatBlock::default(), 11, 0, 0).is_none());
        assert!(ModifierTuple::new(StatBlock::default(), i64::MIN, 0, 0).is_none());
        assert!(ModifierTuple::new(StatBlock::default(), 0, i64::MAX, 0).is_none());
    }

    #[test]
    fn loop_order_matches_nesting() {
        let mut iter = ModifierSpace::new().iter();
        let first = iter.next().unwrap();
        assert_eq!(first.offsets, StatBlock::new(-2, -2, -2, -2));
        // atk = def = agi = 0 forces hp = 10
        assert_eq!(first.bonuses, StatBlock::new(10, 0, 0, 0));

        let second = iter.next().unwrap();
        assert_eq!(second.bonuses, StatBlock::new(9, 0, 0, 1));
    }

    #[test]
    fn rejects_out_of_range_hp_bonus() {
        let offsets = StatBlock::default();
        assert!(ModifierTuple::new(offsets, 5, 5, 5).is_none());
        assert!(ModifierTuple::new(offsets, 0, 0, 0).is_some());
        let perfect = ModifierTuple::new(StatBlock::new(2, 2, 2, 2), 3, 3, 2).unwrap();
        assert!(perfect.is_perfect());
        assert_eq!(perfect.bonuses.hp, 2);
    }
}
