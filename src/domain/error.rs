use thiserror::Error;

use crate::domain::Identifier;

/// Fatal inconsistencies in the index.
///
/// Any of these aborts the whole analysis: the graph is only meaningful if
/// every reference resolves and every annotation is well-formed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A relation or a caller referenced a document that is not in the index.
    #[error("unknown document {0}")]
    UnknownIdentifier(Identifier),

    /// A `Status:` annotation named a status outside the fixed table.
    #[error("unrecognised status '{0}'")]
    UnrecognizedStatus(String),

    /// A publication date whose trailing token is not a year.
    #[error("malformed date '{date}' in document {id}")]
    MalformedDate {
        /// The document carrying the date.
        id: Identifier,
        /// The date text as it appeared in the index.
        date: String,
    },

    /// A relation keyword other than `Updates`/`Updated`/`Obsoletes`/`Obsoleted`.
    #[error("unrecognised relation kind '{0}'")]
    UnrecognizedRelationKind(String),
}
