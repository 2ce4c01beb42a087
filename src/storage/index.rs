//! Reading a plain-text index into a [`Store`].
//!
//! The index is a sequence of blank-line-delimited blocks. Each block is one
//! logical record, possibly wrapped over several physical lines.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use crate::{
    domain::{Error, Store},
    storage::parser::parse_record,
};

/// Errors that can occur while loading an index.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The index file could not be read.
    #[error("failed to read index {path}: {source}")]
    Io {
        /// The index path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The index was read but is not internally consistent.
    #[error(transparent)]
    Index(#[from] Error),
}

/// Joins wrapped physical lines into logical records.
///
/// Lines are trimmed; consecutive non-blank lines are joined with a single
/// space; blank lines end a record. A final record is emitted even without a
/// trailing blank line.
///
/// # Errors
///
/// Returns any error raised while reading from `reader`.
pub fn logical_records<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut records = Vec::new();
    let mut current = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        records.push(current);
    }

    Ok(records)
}

/// Parses logical records into a store and runs the classification pass.
///
/// Logical records that are not shaped like an index entry are skipped.
///
/// # Errors
///
/// Returns an error if a record declares an unrecognised status or if a
/// backward relation names a document that is not in the index.
pub fn parse_records<I, S>(lines: I) -> Result<Store, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut skipped = 0_usize;

    for line in lines {
        let line = line.as_ref();
        match parse_record(line)? {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!(line, "skipping non-record text");
            }
        }
    }

    info!(records = records.len(), skipped, "parsed index");
    Store::from_records(records)
}

impl Store {
    /// Reads an index from `reader`.
    ///
    /// # Errors
    ///
    /// See [`parse_records`]. I/O errors are reported against `"<reader>"`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let lines = logical_records(reader).map_err(|source| LoadError::Io {
            path: PathBuf::from("<reader>"),
            source,
        })?;
        Ok(parse_records(lines)?)
    }

    /// Reads the index file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, and
    /// [`LoadError::Index`] if its content is inconsistent.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let io_error = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let lines = logical_records(BufReader::new(file)).map_err(io_error)?;
        Ok(parse_records(lines)?)
    }
}
