use anyhow::Context as _;
use plate_core::{RequirementError, compute_requirement_range_on, models::HealthGoal};
use plate_solver::{run_annealing, select_best_items};
use platesolve::{AnnealingReport, AppConfig, Cli, Commands, InputError, read_catalog};
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    // Progress and diagnostics are reported through `tracing`; RUST_LOG
    // controls how much of it reaches stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let AppConfig { solver: params } = AppConfig::load(&cli)?;
    event!(Level::DEBUG, ?params, "loaded configuration");

    match cli.command {
        Commands::Targets { meal, io } => {
            let profile = meal.profile()?;
            let target = compute_requirement_range_on(&profile, meal.today())?;
            io.emit(&target)?;
        }
        Commands::Anneal {
            meal,
            catalog,
            items,
            io,
        } => {
            let profile = meal.profile()?;
            let target = compute_requirement_range_on(&profile, meal.today())?;
            let catalog = read_catalog(&catalog)
                .with_context(|| format!("reading catalog {}", catalog.display()))?;
            let items: [_; 3] = items
                .iter()
                .map(|id| catalog.find(id).ok_or_else(|| InputError::UnknownItem(id.clone())))
                .collect::<Result<Vec<_>, _>>()?
                .try_into()
                .map_err(|_| anyhow::anyhow!("expected exactly three item ids"))?;
            let result = run_annealing(&target, items, &params);
            io.emit(&AnnealingReport::from(result))?;
        }
        Commands::Select { meal, catalog, io } => {
            let profile = meal.profile()?;
            let target = compute_requirement_range_on(&profile, meal.today())?;
            let goal: HealthGoal = profile
                .health_goal
                .ok_or(RequirementError::MissingAttribute("health_goal"))?;
            let catalog = read_catalog(&catalog)
                .with_context(|| format!("reading catalog {}", catalog.display()))?;
            let selection = select_best_items(&catalog, &target, goal, &params)?;
            io.emit(&selection)?;
        }
    }

    Ok(())
}
