//! Four-stat containers.

use strum::{Display, EnumIter};

/// The four stats every creature carries, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Agi,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Agi];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Agi => "agi",
        }
    }
}

/// One value per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock<T> {
    pub hp: T,
    pub atk: T,
    pub def: T,
    pub agi: T,
}

/// Hidden per-stat individual values (`u`).
pub type HiddenValues = StatBlock<i64>;

/// Integer stat vector, observed or derived.
pub type StatVector = StatBlock<i64>;

impl<T> StatBlock<T> {
    pub const fn new(hp: T, atk: T, def: T, agi: T) -> Self {
        Self { hp, atk, def, agi }
    }

    pub fn from_fn(mut f: impl FnMut(Stat) -> T) -> Self {
        Self {
            hp: f(Stat::Hp),
            atk: f(Stat::Atk),
            def: f(Stat::Def),
            agi: f(Stat::Agi),
        }
    }

    pub const fn get(&self, stat: Stat) -> &T {
        match stat {
            Stat::Hp => &self.hp,
            Stat::Atk => &self.atk,
            Stat::Def => &self.def,
            Stat::Agi => &self.agi,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> StatBlock<U> {
        StatBlock {
            hp: f(&self.hp),
            atk: f(&self.atk),
            def: f(&self.def),
            agi: f(&self.agi),
        }
    }

    /// Like [`StatBlock::map`] but short-circuits on the first error.
    pub fn try_map<U, E>(&self, mut f: impl FnMut(Stat, &T) -> Result<U, E>) -> Result<StatBlock<U>, E> {
        Ok(StatBlock {
            hp: f(Stat::Hp, &self.hp)?,
            atk: f(Stat::Atk, &self.atk)?,
            def: f(Stat::Def, &self.def)?,
            agi: f(Stat::Agi, &self.agi)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, &T)> {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

impl StatBlock<i64> {
    /// Array in `[hp, atk, def, agi]` order.
    pub const fn to_array(&self) -> [i64; 4] {
        [self.hp, self.atk, self.def, self.agi]
    }

    pub const fn from_array(values: [i64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn sum(&self) -> i64 {
        self.hp + self.atk + self.def + self.agi
    }

    /// Sum of absolute component differences; `None` if it overflows `i64`.
    pub fn l1_distance(&self, other: &Self) -> Option<i64> {
        self.iter().try_fold(0i64, |total, (stat, value)| {
            let diff = value.checked_sub(*other.get(stat))?.checked_abs()?;
            total.checked_add(diff)
        })
    }
}

impl From<[i64; 4]> for StatBlock<i64> {
    fn from(values: [i64; 4]) -> Self {
        Self::from_array(values)
    }
}

impl core::fmt::Display for StatBlock<i64> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{},{},{})", self.hp, self.atk, self.def, self.agi)
    }
}
