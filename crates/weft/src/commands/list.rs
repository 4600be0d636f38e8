//! `weft list` command implementation.

use std::path::PathBuf;

use clap::Args;
use weft_index::ContentIndex;

use crate::error::CliError;
use crate::index_loader::load_index;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Directory holding the markdown content units.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

impl ListArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let index = load_index(&self.root)?;

        output.highlight(&format!(
            "{} content units under {}",
            index.len(),
            self.root.display()
        ));
        for id in index.ids() {
            if let Some(unit) = index.get(id) {
                output.info(&format!("  {id}  ({})", unit.title));
            }
        }
        Ok(())
    }
}
