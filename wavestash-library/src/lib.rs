//! Storage for parsed WAVE files.
//!
//! [`Library`] holds uploaded files in compressed form alongside the metadata the parser
//! extracted from them, answers duration queries, and hands the original bytes back on
//! request.

mod asset;
mod error;
mod library;
mod query;

pub use asset::*;
pub use error::*;
pub use library::*;
pub use query::*;
