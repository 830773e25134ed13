//! Command-line interface definition and parsing.

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use plate_core::models::{Catalog, ItemId, StudentProfile};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write, stdout},
    path::{Path, PathBuf},
};
use time::{Date, OffsetDateTime, macros::format_description};
use tracing::{Level, event};

/// Command-line arguments for the plate optimizer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML file of solver parameters
    #[arg(short, long, global = true, env = "PLATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to compute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

/// The available computations
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the per-meal nutrient targets of a profile
    Targets {
        #[command(flatten)]
        meal: MealArgs,

        #[command(flatten)]
        io: IOArgs,
    },

    /// Size the portions of one item per plate section
    Anneal {
        #[command(flatten)]
        meal: MealArgs,

        /// The catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// The ids of the large, first small and second small section items
        #[arg(long, num_args = 3, value_names = ["LARGE", "SMALL1", "SMALL2"])]
        items: Vec<ItemId>,

        #[command(flatten)]
        io: IOArgs,
    },

    /// Choose the items for every plate section
    Select {
        #[command(flatten)]
        meal: MealArgs,

        /// The catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        #[command(flatten)]
        io: IOArgs,
    },
}

/// The profile a computation is personalized for
#[derive(Args, Debug)]
pub struct MealArgs {
    /// The student profile JSON file
    #[arg(short, long)]
    pub profile: PathBuf,

    /// Measure age as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    pub today: Option<Date>,
}

impl MealArgs {
    /// Read the profile
    pub fn profile(&self) -> anyhow::Result<StudentProfile> {
        read_json(&self.profile)
            .with_context(|| format!("reading profile {}", self.profile.display()))
    }

    /// The date age is measured on
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| OffsetDateTime::now_utc().date())
    }
}

/// Where a subcommand writes its JSON result
#[derive(Args, Debug)]
pub struct IOArgs {
    /// The output file (defaults to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl IOArgs {
    /// Open the output destination
    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        if let Some(path) = &self.output {
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        } else {
            Ok(Box::new(stdout().lock()))
        }
    }

    /// Pretty-print `value` to the output destination
    pub fn emit<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let mut output = self.write()?;
        serde_json::to_writer_pretty(&mut output, value)?;
        writeln!(output)?;
        output.flush()?;
        Ok(())
    }
}

/// Read a catalog from a JSON array of item records
pub fn read_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let catalog: Catalog = read_json(path)?;
    if catalog.is_empty() {
        event!(Level::WARN, path = %path.display(), "catalog has no items");
    }
    Ok(catalog)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}
