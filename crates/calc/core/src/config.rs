/// Calculator configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalcConfig {
    /// Significant digits carried by every decimal operation.
    pub precision: u64,

    /// Population size used as the denominator of the appearance rate.
    /// Supplied by the caller; the engine never reads it.
    pub total_population: u64,
}

impl CalcConfig {
    // ===== growth coefficient domain =====
    pub const K_MIN: i64 = 10;
    pub const K_MAX: i64 = 100;

    // ===== modifier space =====
    pub const OFFSET_MIN: i64 = -2;
    pub const OFFSET_MAX: i64 = 2;
    pub const BONUS_MIN: i64 = 0;
    pub const BONUS_MAX: i64 = 10;
    /// The four bonus levels always sum to this value.
    pub const BONUS_TOTAL: i64 = 10;
    /// Base rank that denotes the "perfect" classification.
    pub const PERFECT_RANK: i64 = 8;
    /// Raw tuples visited by the enumeration, before the bonus-sum filter (5^4 * 11^3).
    pub const RAW_SPACE: u64 = 831_875;
    /// Tuples that survive the bonus-sum filter (5^4 * C(13, 3)).
    pub const VALID_SPACE: u64 = 178_750;

    // ===== inference =====
    pub const EXPONENT_MIN: u32 = 435;
    pub const EXPONENT_MAX: u32 = 575;
    pub const EXPONENT_STEP: u32 = 5;

    // ===== runtime-tunable defaults =====
    pub const MIN_PRECISION: u64 = 50;
    pub const DEFAULT_PRECISION: u64 = 50;
    pub const DEFAULT_TOTAL_POPULATION: u64 = Self::VALID_SPACE;

    pub fn new() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            total_population: Self::DEFAULT_TOTAL_POPULATION,
        }
    }

    pub fn with_precision(precision: u64) -> Self {
        Self {
            precision,
            ..Self::new()
        }
    }

    /// Returns true if `k` lies inside the valid growth coefficient domain.
    pub const fn is_valid_k(k: i64) -> bool {
        k >= Self::K_MIN && k <= Self::K_MAX
    }
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self::new()
    }
}
