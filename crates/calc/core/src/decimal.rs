//! Fixed-precision decimal arithmetic.
//!
//! [`DecimalContext`] wraps [`BigDecimal`] and rounds the result of every
//! operation to a fixed number of significant digits (half-up), so repeated
//! multiply-then-floor chains never pick up binary floating-point drift.
//! Flooring and half-up rounding to an integer or to a number of decimal
//! places are explicit operations.

use std::num::NonZeroU64;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};

/// Decimal arithmetic at a fixed significant-digit precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalContext {
    precision: NonZeroU64,
}

impl DecimalContext {
    /// Builds a context carrying `precision` significant digits.
    ///
    /// Fails with [`CalcError::ArithmeticUnavailable`] when the precision is
    /// below [`CalcConfig::MIN_PRECISION`].
    pub fn new(precision: u64) -> Result<Self> {
        NonZeroU64::new(precision)
            .filter(|p| p.get() >= CalcConfig::MIN_PRECISION)
            .map(|precision| Self { precision })
            .ok_or(CalcError::ArithmeticUnavailable {
                requested: precision,
                minimum: CalcConfig::MIN_PRECISION,
            })
    }

    /// Builds a context from calculator configuration.
    pub fn from_config(config: &CalcConfig) -> Result<Self> {
        Self::new(config.precision)
    }

    pub const fn precision(&self) -> u64 {
        self.precision.get()
    }

    // ===== constructors =====

    pub fn int(&self, value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    /// `digits * 10^-scale`, e.g. `exact(25, 1)` is `2.5`.
    pub fn exact(&self, digits: i64, scale: i64) -> BigDecimal {
        BigDecimal::new(BigInt::from(digits), scale)
    }

    /// Converts a finite float through its shortest round-trip representation,
    /// so `0.1` becomes exactly `0.1` rather than its binary expansion.
    pub fn from_f64(&self, value: f64, field: &'static str) -> Result<BigDecimal> {
        if !value.is_finite() {
            return Err(CalcError::invalid(field, "value is not finite"));
        }
        let parsed = BigDecimal::from_str(&value.to_string())
            .map_err(|_| CalcError::invalid(field, "value is not a decimal number"))?;
        Ok(self.fix(parsed))
    }

    // ===== arithmetic =====

    pub fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.fix(lhs + rhs)
    }

    pub fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.fix(lhs - rhs)
    }

    pub fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.fix(lhs * rhs)
    }

    /// Divides `lhs` by `rhs`; `None` when `rhs` is exactly zero.
    pub fn div(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Option<BigDecimal> {
        if rhs.is_zero() {
            return None;
        }
        Some(self.fix(lhs / rhs))
    }

    /// Sums a sequence left to right, rounding after every addition.
    pub fn sum<'a>(&self, terms: impl IntoIterator<Item = &'a BigDecimal>) -> BigDecimal {
        terms
            .into_iter()
            .fold(BigDecimal::zero(), |acc, term| self.add(&acc, term))
    }

    // ===== rounding =====

    /// Largest integer not greater than `value`.
    pub fn floor(&self, value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(0, RoundingMode::Floor)
    }

    /// Nearest integer, ties away from zero.
    pub fn round_half_up(&self, value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(0, RoundingMode::HalfUp)
    }

    /// Rounds to `places` decimal places, ties away from zero.
    pub fn round_places(&self, value: &BigDecimal, places: i64) -> BigDecimal {
        value.with_scale_round(places, RoundingMode::HalfUp)
    }

    /// Floors `value` and converts it to a machine integer.
    pub fn floor_i64(&self, value: &BigDecimal, field: &'static str) -> Result<i64> {
        self.floor(value)
            .to_i64()
            .ok_or(CalcError::invalid(field, "value does not fit in an integer"))
    }

    /// Rounds `value` half-up and converts it to a machine integer.
    pub fn round_i64(&self, value: &BigDecimal, field: &'static str) -> Result<i64> {
        self.round_half_up(value)
            .to_i64()
            .ok_or(CalcError::invalid(field, "value does not fit in an integer"))
    }

    fn fix(&self, value: BigDecimal) -> BigDecimal {
        value.with_precision_round(self.precision, RoundingMode::HalfUp)
    }
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: NonZeroU64::new(CalcConfig::DEFAULT_PRECISION)
                .unwrap_or(NonZeroU64::MIN),
        }
    }
}
