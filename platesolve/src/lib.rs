#![warn(missing_docs)]
//! A command-line collaborator for the plate optimizer.
//!
//! Profiles and catalogs are read as JSON, solver parameters are layered from
//! defaults, an optional TOML file and `PLATE_*` environment variables, and
//! every result is written back out as JSON.

mod cli;
pub use cli::{Cli, Commands, IOArgs, MealArgs, read_catalog};

mod config;
pub use config::AppConfig;

mod report;
pub use report::{AnnealingReport, PortionReport};

/// Failures in interpreting the inputs, beyond those of the library crates
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// An item id given on the command line is not in the catalog
    #[error("item {0} is not in the catalog")]
    UnknownItem(plate_core::models::ItemId),
}
