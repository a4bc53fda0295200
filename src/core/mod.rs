//! Core business logic modules.

pub mod batch;
pub mod diagnostics;
pub mod normalizer;
pub mod posters;
pub mod resolver;
pub mod store;
pub mod updater;
