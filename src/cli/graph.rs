use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use rfcgraph::{Config, GraphRenderer, Store};
use tracing::{info, instrument};

use crate::cli::Selection;

/// Command arguments for `rfcgraph graph`.
#[derive(Debug, Parser)]
pub struct Graph {
    #[command(flatten)]
    pub(super) selection: Selection,

    /// Lay documents out on a timeline by year, with a status legend
    #[arg(short, long)]
    pub(super) timeline: bool,

    /// Write the graph to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub(super) output: Option<PathBuf>,
}

impl Graph {
    #[instrument(skip_all)]
    pub fn run(self, store: &Store, config: &Config) -> anyhow::Result<()> {
        let text = self.render(store, config)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "wrote graph");
            }
            None => std::io::stdout().lock().write_all(text.as_bytes())?,
        }

        Ok(())
    }

    fn render(&self, store: &Store, config: &Config) -> anyhow::Result<String> {
        let analysis = self.selection.analyse(store, config)?;
        let renderer = GraphRenderer::new().with_timeline(self.timeline || config.timeline);
        Ok(renderer.render(&analysis)?)
    }
}
