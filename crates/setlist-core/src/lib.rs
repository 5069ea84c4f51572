//! Core domain model for setlist.
//!
//! This crate defines the track record read from a catalog, the normalized
//! record derived from it, the text canonicalization rules shared by indexing
//! and querying, and the loaders for JSON and CSV catalogs.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod normalize;

pub use catalog::{load_catalog, CatalogFormat};
pub use error::{Error, Result};
pub use model::{NormalizedRecord, TrackRecord};
