use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration for graph extraction.
///
/// Every setting has a command-line counterpart that takes precedence over
/// the value stored here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// Path of the plain-text index to read.
    pub index: PathBuf,

    /// The minimum number of documents a component must contain to be
    /// listed or rendered.
    ///
    /// `0` and `1` both select every component.
    pub min_size: usize,

    /// Whether graphs are rendered with a chronological timeline and a
    /// status legend.
    pub timeline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index: default_index(),
            min_size: 0,
            timeline: false,
        }
    }
}

impl Config {
    /// The file name looked up in the working directory when no
    /// configuration path is given.
    pub const FILE_NAME: &'static str = "rfcgraph.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from `path` if given, otherwise from
    /// [`Config::FILE_NAME`] in `dir` if that file exists, otherwise returns
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read, or if any
    /// file that is read cannot be parsed.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, String> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(Self::FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_index() -> PathBuf {
    PathBuf::from("rfc-index.txt")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_index")]
        index: PathBuf,

        #[serde(default)]
        min_size: usize,

        #[serde(default)]
        timeline: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                index,
                min_size,
                timeline,
            } => Self {
                index,
                min_size,
                timeline,
            },
        }
    }
}
