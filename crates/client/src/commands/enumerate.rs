//! Enumeration with explicit parameters.

use anyhow::Result;
use clap::Parser;
use runtime::EnumerationRequest;

use super::{Session, print_json, stat_vector};
use crate::report::ReportView;

/// Count modifier tuples for explicit k, u and observation
#[derive(Parser)]
pub struct Enumerate {
    /// Growth coefficient (10..=100)
    #[arg(long)]
    k: i64,

    /// Hidden values
    #[arg(
        long,
        required = true,
        num_args = 4,
        value_names = ["HP", "ATK", "DEF", "AGI"],
        allow_negative_numbers = true
    )]
    u: Vec<i64>,

    /// Observed level-1 stats
    #[arg(
        long,
        required = true,
        num_args = 4,
        value_names = ["HP", "ATK", "DEF", "AGI"],
        allow_negative_numbers = true
    )]
    obs: Vec<i64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Enumerate {
    pub async fn execute(self, session: &mut Session) -> Result<()> {
        let request = EnumerationRequest::new(self.k, stat_vector(&self.u)?, stat_vector(&self.obs)?);
        let result = session.handle.enumerate(request).await?;
        let view = ReportView::from_result(
            request.params,
            request.obs,
            &result,
            session.total_population,
        );

        if self.json {
            print_json(&view)
        } else {
            print!("{}", view.render());
            Ok(())
        }
    }
}
