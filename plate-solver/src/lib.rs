#![warn(missing_docs)]
//! Portion optimization and item selection for plate-based meals.
//!
//! [`run_annealing`] sizes the portions of a single item triple against a
//! per-meal target range, and [`select_best_items`] picks the subset of items
//! for each plate section whose triples fit the target best.

use plate_core::models::{Catalog, ConfigurationError, HealthGoal, MealItemSpec, TargetRange};

/**
 * An item placed into a plate section, with an adjustable serving size.
 */
mod portion;
pub use portion::*;

/**
 * The simulated annealing search over serving sizes.
 */
mod annealing;
pub use annealing::*;

/**
 * Tuning parameters shared by the optimizer and the selector.
 */
mod params;
pub use params::*;

/**
 * The exhaustive two-phase item selector.
 */
mod selector;
pub use selector::*;

/// The outcome of annealing a single item triple
#[derive(Clone, Debug)]
pub struct AnnealingResult {
    /// Cost, iterations and timing of the run
    pub outcome: AnnealingOutcome,
    /// The portions at their final serving sizes, in (large, small1, small2) order
    pub portions: Vec<PortionModel>,
}

/// Anneal the serving sizes of one item per plate section against `target`
pub fn run_annealing(
    target: &TargetRange,
    items: [&MealItemSpec; 3],
    params: &SolverParams,
) -> AnnealingResult {
    let portions = triple_portions(items, &params.layout);
    let mut run = SimulatedAnnealing::new(*target, params.weights, portions, &params.annealing);
    let outcome = run.run();
    AnnealingResult {
        outcome,
        portions: run.into_state(),
    }
}

/// Choose the items for each plate section of a meal
pub fn select_best_items(
    catalog: &Catalog,
    target: &TargetRange,
    goal: HealthGoal,
    params: &SolverParams,
) -> Result<Selection, ConfigurationError> {
    let mut selector = MealItemSelector::new(*target, goal, *params)?;
    Ok(selector.run(catalog))
}
