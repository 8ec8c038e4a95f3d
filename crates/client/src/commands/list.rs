//! List pet names, optionally filtered.

use anyhow::Result;
use calc_content::search::KEYPAD;
use clap::Parser;

use super::Session;

/// List pets in the table
#[derive(Parser)]
pub struct List {
    /// Substring the name must contain
    #[arg(short, long, value_name = "TEXT")]
    keyword: Option<String>,

    /// Hangul initial consonants the name must start with (e.g. ㄱㄷ)
    #[arg(short, long, value_name = "INITIALS")]
    chosung: Option<String>,

    /// Print the consonants accepted by --chosung and exit
    #[arg(long, conflicts_with_all = ["keyword", "chosung"])]
    keypad: bool,
}

impl List {
    pub async fn execute(self, session: &mut Session) -> Result<()> {
        if self.keypad {
            println!("{}", keypad_line());
            return Ok(());
        }

        let catalog = session.handle.catalog();
        let names = catalog.search(
            self.keyword.as_deref().unwrap_or_default(),
            self.chosung.as_deref().unwrap_or_default(),
        );

        for name in &names {
            println!("{name}");
        }
        eprintln!("{} of {} pets", names.len(), catalog.len());
        Ok(())
    }
}

/// Single consonants separated by spaces; double consonants fold onto these.
fn keypad_line() -> String {
    KEYPAD.iter().map(char::to_string).collect::<Vec<_>>().join(" ")
}
