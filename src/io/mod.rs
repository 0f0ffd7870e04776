//! Input helpers.
//!
//! - point file ingest + validation (`ingest`)

pub mod ingest;

pub use ingest::*;
