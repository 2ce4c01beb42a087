use std::io::{self, Write};

use clap::Parser;
use rfcgraph::{Identifier, Store, traverse};

use crate::cli::parse_identifier;

/// Command arguments for `rfcgraph traverse`.
#[derive(Debug, Parser)]
pub struct Traverse {
    /// The document to start from (e.g. 4346 or RFC4346)
    #[arg(value_parser = parse_identifier)]
    pub(super) start: Identifier,
}

impl Traverse {
    pub fn run(self, store: &Store) -> anyhow::Result<()> {
        let stdout = io::stdout();
        self.write(store, &mut stdout.lock())
    }

    fn write<W: Write>(&self, store: &Store, out: &mut W) -> anyhow::Result<()> {
        for record in traverse(store, &self.start)? {
            writeln!(out, "{record}")?;
        }
        Ok(())
    }
}
