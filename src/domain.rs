//! Domain models for standards-document relationship graphs.
//!
//! This module contains the record types parsed from the index, the
//! in-memory store, and the graph analyses run over it.

/// Connected-component discovery over the relation graph.
pub mod components;
pub use components::{Analysis, Component, Edge};

mod config;
pub use config::Config;

mod error;
pub use error::Error;

/// Document identifier type and parsing.
pub mod identifier;
pub use identifier::{Identifier, InvalidIdentifierError};

/// Record model: relations, classifications and lifecycle statuses.
pub mod record;
pub use record::{Classification, LifecycleStatus, Record, RelationKind};

mod store;
pub use store::Store;

mod traversal;
pub use traversal::traverse;
