//! Relationship graphs of standards documents
//!
//! Documents are read from a plain-text index whose entries carry
//! `Updates`/`Obsoletes` annotations. Connected families of documents are
//! discovered and rendered as Graphviz descriptions.

pub mod domain;
pub use domain::{
    Analysis, Classification, Component, Config, Edge, Error, Identifier, LifecycleStatus,
    Record, RelationKind, Store, traverse,
};

/// Graphviz rendering of analysed components.
pub mod render;
pub use render::{GraphRenderer, RenderError};

/// Index file reading and record parsing.
pub mod storage;
pub use storage::{LoadError, parse_record};
