use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use rfcgraph::{Analysis, Config, Identifier, Store};
use serde::Serialize;
use tracing::instrument;

use crate::cli::Selection;

/// Command arguments for `rfcgraph list`.
#[derive(Debug, Parser)]
pub struct List {
    #[command(flatten)]
    pub(super) selection: Selection,

    /// Output format (default: tsv).
    #[arg(long, value_enum, default_value_t)]
    pub(super) format: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// `<leader>\t<size>\t<title>` per family.
    #[default]
    Tsv,
    /// A JSON array of `{leader, size, title}` objects.
    Json,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    leader: &'a Identifier,
    size: usize,
    title: &'a str,
}

impl List {
    #[instrument(skip_all)]
    pub fn run(self, store: &Store, config: &Config) -> anyhow::Result<()> {
        let analysis = self.selection.analyse(store, config)?;
        let stdout = io::stdout();
        self.write(&analysis, &mut stdout.lock())
    }

    fn write<W: Write>(&self, analysis: &Analysis<'_>, out: &mut W) -> anyhow::Result<()> {
        let rows = rows(analysis)?;

        match self.format {
            OutputFormat::Tsv => {
                for row in rows {
                    writeln!(out, "{}\t{}\t{}", row.leader, row.size, row.title)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

fn rows<'a>(analysis: &Analysis<'a>) -> anyhow::Result<Vec<Row<'a>>> {
    let store = analysis.store();
    analysis
        .components()
        .iter()
        .map(|component| {
            let leader = store.get(&component.leader)?;
            Ok(Row {
                leader: &leader.id,
                size: component.size,
                title: &leader.title,
            })
        })
        .collect()
}
