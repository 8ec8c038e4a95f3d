//! Resolve growth parameters of one pet.

use anyhow::Result;
use calc_core::ParamSource;
use clap::Parser;

use super::Session;

/// Print the known or inferred growth parameters of a pet
#[derive(Parser)]
pub struct Infer {
    #[arg(value_name = "NAME")]
    name: String,
}

impl Infer {
    pub async fn execute(self, session: &mut Session) -> Result<()> {
        let resolved = session.handle.resolve(&self.name)?;

        println!("{}", self.name);
        println!("  params    {}", resolved.params);
        match &resolved.source {
            ParamSource::Known => println!("  source    known"),
            ParamSource::Inferred(candidate) => {
                println!("  source    inferred");
                println!("  exponent  {}", candidate.exponent);
                println!(
                    "  fit       {} (residual {})",
                    if candidate.exact_fit { "exact" } else { "closest" },
                    candidate.fit_residual
                );
                println!("  score     {}", candidate.score);
            }
        }
        if !resolved.params.has_valid_k() {
            eprintln!("warning: k={} lies outside 10..=100", resolved.params.k);
        }
        Ok(())
    }
}
