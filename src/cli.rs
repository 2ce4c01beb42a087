use std::path::{Path, PathBuf};

mod graph;
mod list;
mod traverse;

use anyhow::Context;
use clap::ArgAction;
use graph::Graph;
use list::List;
use rfcgraph::{Analysis, Config, Identifier, Store};
use tracing::{instrument, warn};
use traverse::Traverse;

/// Parse a document identifier, accepting an optional `RFC` prefix.
fn parse_identifier(s: &str) -> Result<Identifier, String> {
    let digits = s
        .strip_prefix("RFC")
        .or_else(|| s.strip_prefix("rfc"))
        .unwrap_or(s);
    digits.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The plain-text index to read [default: rfc-index.txt]
    #[arg(short, long, global = true)]
    index: Option<PathBuf>,

    /// Configuration file [default: ./rfcgraph.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = Config::discover(self.config.as_deref(), Path::new("."))
            .map_err(anyhow::Error::msg)?;
        if let Some(index) = self.index {
            config.index = index;
        }

        let store = load_store(&config.index)?;
        self.command.run(&store, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[instrument]
fn load_store(path: &Path) -> anyhow::Result<Store> {
    let store =
        Store::load(path).with_context(|| format!("failed to load index {}", path.display()))?;
    if store.is_empty() {
        warn!(path = %path.display(), "index contains no records");
    }
    Ok(store)
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List connected document families, one per line
    ///
    /// Each line is the family's leader (lowest identifier), its size, and
    /// the leader's title, separated by tabs.
    List(List),

    /// Render connected document families as a Graphviz digraph
    Graph(Graph),

    /// Print every document related to a starting document
    Traverse(Traverse),
}

impl Command {
    fn run(self, store: &Store, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(store, config)?,
            Self::Graph(command) => command.run(store, config)?,
            Self::Traverse(command) => command.run(store)?,
        }
        Ok(())
    }
}

/// Which components to select.
#[derive(Debug, Default, clap::Args)]
pub struct Selection {
    /// Minimum number of documents in a family [default: from config, or 0]
    #[arg(short = 's', long, value_name = "N")]
    min_size: Option<usize>,

    /// Comma-separated documents whose families to consider (default: all)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_identifier, value_name = "ID")]
    roots: Vec<Identifier>,
}

impl Selection {
    /// Discovers the selected components.
    fn analyse<'s>(&self, store: &'s Store, config: &Config) -> anyhow::Result<Analysis<'s>> {
        let min_size = self.min_size.unwrap_or(config.min_size);
        let mut analysis = Analysis::new(store);

        if self.roots.is_empty() {
            analysis.sweep(min_size)?;
        } else {
            if let Some(unknown) = self.roots.iter().find(|root| !store.contains(root)) {
                return Err(rfcgraph::Error::UnknownIdentifier(unknown.clone()).into());
            }
            analysis.find_components(&self.roots, min_size)?;
        }

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::Parser;

    use super::*;

    pub(super) const INDEX: &str = "\
0050 Comments on the Meyer proposal. R.D. Bressler. April 1970. (Obsoleted by
     RFC0100) (Status: HISTORIC)

0100 Categorization and guide to NWG/RFCs. P.M. Karp. February 1971.
     (Obsoletes RFC0050) (Status: UNKNOWN)

0300 Unrelated. A. Nother. March 1972. (Status: PROPOSED STANDARD)
";

    pub(super) fn store() -> Store {
        Store::from_reader(Cursor::new(INDEX)).unwrap()
    }

    #[test]
    fn identifiers_accept_rfc_prefix() {
        assert_eq!(parse_identifier("RFC0050").unwrap().as_str(), "0050");
        assert_eq!(parse_identifier("rfc4346").unwrap().as_str(), "4346");
        assert_eq!(parse_identifier("793").unwrap().as_str(), "793");
        assert!(parse_identifier("RFC").is_err());
        assert!(parse_identifier("STD0003").is_err());
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rfcgraph", "graph", "-s", "3", "--roots", "4346,RFC5246", "-i", "index.txt", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.index, Some(PathBuf::from("index.txt")));
        let Command::Graph(graph) = cli.command else {
            panic!("expected graph command");
        };
        assert_eq!(graph.selection.min_size, Some(3));
        assert_eq!(
            graph.selection.roots,
            [Identifier::new("4346").unwrap(), Identifier::new("5246").unwrap()]
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["rfcgraph"]).is_err());
    }

    #[test]
    fn selection_defaults_to_config_min_size() {
        let store = store();
        let config = Config {
            min_size: 2,
            ..Config::default()
        };

        let analysis = Selection::default().analyse(&store, &config).unwrap();
        assert_eq!(analysis.components().len(), 1);

        let selection = Selection {
            min_size: Some(0),
            roots: Vec::new(),
        };
        let analysis = selection.analyse(&store, &config).unwrap();
        assert_eq!(analysis.components().len(), 2);
    }

    #[test]
    fn selection_with_unknown_root_fails() {
        let store = store();
        let selection = Selection {
            min_size: None,
            roots: vec![Identifier::new("9999").unwrap()],
        };

        let error = selection
            .analyse(&store, &Config::default())
            .unwrap_err()
            .to_string();
        assert_eq!(error, "unknown document 9999");
    }

    #[test]
    fn load_store_accepts_empty_index() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rfc-index.txt");
        std::fs::write(&path, "RFC INDEX\n\n").unwrap();

        assert!(load_store(&path).unwrap().is_empty());
    }

    #[test]
    fn load_store_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("rfc-index.txt");

        let error = load_store(&missing).unwrap_err().to_string();
        assert!(error.starts_with("failed to load index"));
    }
}
