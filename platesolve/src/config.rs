//! Solver configuration management.
//!
//! Parameters are merged from several sources with a clear precedence order:
//! built-in defaults, then an optional TOML file, then environment variables.

use crate::Cli;
use plate_solver::SolverParams;
use serde::{Deserialize, Serialize};

/// The application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Cost weights, cooling schedule, container volumes and subset size
    #[serde(flatten)]
    pub solver: SolverParams,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `PLATE_<SECTION>__<KEY>` to `<section>.<key>`.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Cool faster
    /// export PLATE_ANNEALING__ALPHA=0.95
    ///
    /// # Non-reproducible runs
    /// export PLATE_ANNEALING__SEED=-1
    ///
    /// # A breakfast plate without a large section
    /// export PLATE_LAYOUT__LARGE=0
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // This maps PLATE_ANNEALING__SMALLEST_TEMP to annealing.smallest_temp
        config = config.add_source(
            config::Environment::with_prefix("PLATE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
