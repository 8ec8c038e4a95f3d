//! Linear solve for hidden values from a high-level snapshot.
//!
//! For an assumed exponent `e` the high-level snapshot is
//! `SG = f * W * (u + 2.5)` with `f = e / 10000` and `W` the stat-formula
//! weights. The agi row is decoupled and solved in closed form; the remaining
//! three rows form a 3×3 system solved by Gauss–Jordan elimination with
//! partial pivoting.

use bigdecimal::BigDecimal;

use crate::decimal::DecimalContext;
use crate::error::{CalcError, Result};
use crate::record::Snapshot;
use crate::stats::{HiddenValues, StatBlock, Weights, weighted_stats};

/// Hidden values recovered for one exponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSolution {
    pub u: HiddenValues,
    pub exponent: u32,
    /// Sum of absolute differences between the reconstructed and observed
    /// snapshot, compared at two decimal places.
    pub snapshot_error: BigDecimal,
}

type Row = [BigDecimal; 4];

/// `e / 10000`.
pub fn exponent_factor(ctx: &DecimalContext, exponent: u32) -> BigDecimal {
    ctx.exact(i64::from(exponent), 4)
}

/// Recovers `u` from `sg` assuming `exponent`.
pub fn solve_hidden_values(
    ctx: &DecimalContext,
    weights: &Weights,
    sg: &Snapshot,
    exponent: u32,
) -> Result<LinearSolution> {
    let observed = sg.to_decimal(ctx)?;
    let f = exponent_factor(ctx, exponent);
    let half_step = ctx.exact(25, 1);
    let degenerate = || CalcError::DegenerateSystem { exponent };

    // agi: SG.agi = f * (u.agi + 2.5)
    let d = ctx.sub(
        &ctx.div(
            &ctx.mul(&observed.agi, &ctx.int(10_000)),
            &ctx.int(i64::from(exponent)),
        )
        .ok_or_else(degenerate)?,
        &half_step,
    );
    let agi = ctx.round_half_up(&d);
    let d_plus = ctx.add(&agi, &half_step);

    let agi_share = ctx.mul(&d_plus, &f);
    let agi_twentieth = ctx.mul(&agi_share, &weights.twentieth);
    let rhs = |value: &BigDecimal, share: &BigDecimal| {
        ctx.div(&ctx.sub(value, share), &f).ok_or_else(degenerate)
    };

    let one = ctx.int(1);
    let mut system: [Row; 3] = [
        [
            weights.four.clone(),
            one.clone(),
            one.clone(),
            rhs(&observed.hp, &agi_share)?,
        ],
        [
            weights.tenth.clone(),
            one.clone(),
            weights.tenth.clone(),
            rhs(&observed.atk, &agi_twentieth)?,
        ],
        [
            weights.tenth.clone(),
            weights.tenth.clone(),
            one,
            rhs(&observed.def, &agi_twentieth)?,
        ],
    ];

    let [hp_base, atk_base, def_base] =
        gauss_jordan(ctx, &mut system).ok_or_else(degenerate)?;

    let u = HiddenValues {
        hp: ctx.round_i64(&ctx.sub(&hp_base, &half_step), "hp")?,
        atk: ctx.round_i64(&ctx.sub(&atk_base, &half_step), "atk")?,
        def: ctx.round_i64(&ctx.sub(&def_base, &half_step), "def")?,
        agi: ctx.round_i64(&agi, "agi")?,
    };

    let snapshot_error = reconstruction_error(ctx, weights, &u, &f, &observed);

    Ok(LinearSolution {
        u,
        exponent,
        snapshot_error,
    })
}

/// Rebuilds the snapshot `u` and `f` would produce and sums the absolute
/// differences against `observed`, both sides rounded to two places.
pub fn reconstruction_error(
    ctx: &DecimalContext,
    weights: &Weights,
    u: &HiddenValues,
    f: &BigDecimal,
    observed: &StatBlock<BigDecimal>,
) -> BigDecimal {
    let predicted = reconstruct_snapshot(ctx, weights, u, f);
    let errors: Vec<BigDecimal> = predicted
        .iter()
        .map(|(stat, value)| {
            let diff = ctx.sub(value, &ctx.round_places(observed.get(stat), 2));
            diff.abs()
        })
        .collect();
    ctx.sum(&errors)
}

/// Predicted high-level snapshot for `u` at factor `f`, rounded to two places.
pub fn reconstruct_snapshot(
    ctx: &DecimalContext,
    weights: &Weights,
    u: &HiddenValues,
    f: &BigDecimal,
) -> StatBlock<BigDecimal> {
    let half_step = ctx.exact(25, 1);
    let bases = u.map(|value| ctx.add(&ctx.int(*value), &half_step));
    let mixed = weighted_stats(ctx, weights, &bases);
    mixed.map(|value| ctx.round_places(&ctx.mul(f, value), 2))
}

/// Reduces an augmented 3×4 system to reduced row echelon form in place and
/// returns the solution column.
///
/// At each step the row with the largest absolute entry in the pivot column
/// (among rows not yet used) is swapped in. Returns `None` only for an exactly
/// zero pivot; near-zero pivots are divided through unchanged.
fn gauss_jordan(ctx: &DecimalContext, system: &mut [Row; 3]) -> Option<[BigDecimal; 3]> {
    for col in 0..3 {
        let mut pivot_row = col;
        let mut pivot_abs = system[col][col].abs();
        for row in col + 1..3 {
            let candidate = system[row][col].abs();
            if candidate > pivot_abs {
                pivot_row = row;
                pivot_abs = candidate;
            }
        }
        system.swap(col, pivot_row);

        let pivot = system[col][col].clone();
        for j in col..4 {
            system[col][j] = ctx.div(&system[col][j], &pivot)?;
        }

        let pivot_values = system[col].clone();
        for (row, values) in system.iter_mut().enumerate() {
            if row == col {
                continue;
            }
            let factor = values[col].clone();
            for j in col..4 {
                values[j] = ctx.sub(&values[j], &ctx.mul(&factor, &pivot_values[j]));
            }
        }
    }

    let [first, second, third] = system;
    Some([first[3].clone(), second[3].clone(), third[3].clone()])
}
