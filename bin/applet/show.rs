use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::variant::{Catalog, Directory, Draft, Store};
use tracing::instrument;

/// Prints a saved variant.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Show {
    /// Also draw the boards.
    #[clap(short, long)]
    boards: bool,

    /// The name of the variant.
    name: String,
}

impl Show {
    #[instrument(level = "trace", skip(self, catalog), err)]
    pub fn execute(self, store: Directory, catalog: Catalog) -> Result<(), Anyhow> {
        let record = store
            .load(&self.name)
            .with_context(|| format!("failed to load variant `{}`", self.name))?;

        if self.boards {
            println!("{}", Draft::load(catalog, record.clone()));
        }

        println!("{}", record);
        Ok(())
    }
}
