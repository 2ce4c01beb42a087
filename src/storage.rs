/// Reading index files into a store.
pub mod index;
mod parser;

pub use index::{LoadError, logical_records, parse_records};
pub use parser::parse_record;
