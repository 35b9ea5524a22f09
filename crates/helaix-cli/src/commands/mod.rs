//! CLI command implementations.

pub mod compile;
pub mod models;
pub mod settings;
pub mod variax;
