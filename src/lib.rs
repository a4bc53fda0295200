//! Watched-list enricher library.
//!
//! Resolves entries of a watched-list YAML file to TMDB records and writes
//! back TMDB IDs, English titles and localized posters.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
