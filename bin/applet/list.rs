use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::variant::Directory;
use tracing::{info, instrument};

/// Lists the saved variants.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct List {}

impl List {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self, store: Directory) -> Result<(), Anyhow> {
        let names = store.names().context("failed to list variants")?;
        info!(count = names.len(), root = %store.root().display());

        for name in names {
            println!("{}", name);
        }

        Ok(())
    }
}
