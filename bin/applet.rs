use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;
use lib::variant::{Catalog, Directory};

mod edit;
mod list;
mod show;

#[derive(From, Subcommand)]
pub enum Applet {
    Edit(edit::Edit),
    List(list::List),
    Show(show::Show),
}

impl Default for Applet {
    fn default() -> Self {
        edit::Edit::default().into()
    }
}

impl Applet {
    pub fn execute(self, store: Directory, catalog: Catalog) -> Result<(), Anyhow> {
        match self {
            Applet::Edit(a) => a.execute(store, catalog),
            Applet::List(a) => a.execute(store),
            Applet::Show(a) => a.execute(store, catalog),
        }
    }
}
