//! Print one record of the pet table.

use anyhow::{Result, anyhow};
use calc_core::RawStats;
use clap::Parser;

use super::Session;

const RANK8_PREVIEW: usize = 20;

/// Show the stored record and guaranteed rank-8 sets of a pet
#[derive(Parser)]
pub struct Show {
    /// Pet name as listed in the table
    #[arg(value_name = "NAME")]
    name: String,
}

impl Show {
    pub async fn execute(self, session: &mut Session) -> Result<()> {
        let catalog = session.handle.catalog();
        let record = catalog
            .get(&self.name)
            .ok_or_else(|| anyhow!("Unknown pet: {}", self.name))?;

        println!("{}", self.name);
        println!("  s0    {}", fmt_raw(record.s0.as_ref()));
        println!("  sg    {}", fmt_raw(record.sg.as_ref()));
        println!("  k     {}", record.k.map(|k| k.to_string()).unwrap_or_else(|| "-".into()));
        println!("  u     {}", fmt_raw(record.u.as_ref()));

        match catalog.rank8(&self.name) {
            Some(entry) => {
                let (preview, rest) = entry.preview(RANK8_PREVIEW);
                println!("  rank8 {preview}");
                if rest > 0 {
                    println!("        (+{rest} more)");
                }
            }
            None => println!("  rank8 -"),
        }
        Ok(())
    }
}

fn fmt_raw(stats: Option<&RawStats>) -> String {
    let Some(stats) = stats else {
        return "-".to_string();
    };
    let part = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_else(|| "?".into());
    format!(
        "({},{},{},{})",
        part(stats.hp),
        part(stats.atk),
        part(stats.def),
        part(stats.agi)
    )
}
