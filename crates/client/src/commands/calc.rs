//! Full calculation for a named pet.

use anyhow::Result;
use clap::Parser;

use super::{Session, print_json, stat_vector};
use crate::report::ReportView;

/// Resolve a pet's parameters and count matching modifier tuples
#[derive(Parser)]
pub struct Calc {
    #[arg(value_name = "NAME")]
    name: String,

    /// Observed level-1 stats; defaults to the floored stored S0
    #[arg(
        long,
        num_args = 4,
        value_names = ["HP", "ATK", "DEF", "AGI"],
        allow_negative_numbers = true
    )]
    obs: Option<Vec<i64>>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Calc {
    pub async fn execute(self, session: &mut Session) -> Result<()> {
        let obs = self.obs.as_deref().map(stat_vector).transpose()?;
        let report = session.handle.calculate(&self.name, obs).await?;
        let view = ReportView::from_report(&report, session.total_population);

        if self.json {
            print_json(&view)
        } else {
            print!("{}", view.render());
            Ok(())
        }
    }
}
