//! Subcommand implementations.
//!
//! Each command owns its CLI arguments and runs against a [`Session`].

mod calc;
mod enumerate;
mod infer;
mod list;
mod show;

use anyhow::{Result, bail};
use calc_core::StatVector;
use runtime::CalculatorHandle;

pub use calc::Calc;
pub use enumerate::Enumerate;
pub use infer::Infer;
pub use list::List;
pub use show::Show;

/// Runtime handle plus the settings commands report against.
pub struct Session {
    pub handle: CalculatorHandle,
    pub total_population: u64,
}

impl Session {
    pub fn new(handle: CalculatorHandle) -> Self {
        let total_population = handle.config().total_population;
        Self {
            handle,
            total_population,
        }
    }
}

/// Four values in `HP ATK DEF AGI` order.
fn stat_vector(values: &[i64]) -> Result<StatVector> {
    match values {
        [hp, atk, def, agi] => Ok(StatVector::new(*hp, *atk, *def, *agi)),
        _ => bail!("Expected 4 values (HP ATK DEF AGI), got {}", values.len()),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
