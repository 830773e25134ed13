use plate_core::models::{ItemId, NutritionVector, PlateSection};
use plate_solver::{AnnealingOutcome, AnnealingResult, PortionModel, SimulatedAnnealing};
use serde::Serialize;

/// A sized portion, as reported by the `anneal` command
#[derive(Debug, Serialize)]
pub struct PortionReport {
    /// The catalog item
    pub id: ItemId,
    /// The section it fills
    pub section: PlateSection,
    /// The serving size in the catalog sign convention (negative piece counts)
    pub volume: f64,
    /// The nutrition at this serving size
    pub nutrition: NutritionVector,
}

impl From<&PortionModel> for PortionReport {
    fn from(value: &PortionModel) -> Self {
        Self {
            id: value.id().clone(),
            section: value.section(),
            volume: value.volume().raw(),
            nutrition: value.scaled_nutrition(),
        }
    }
}

/// The result of the `anneal` command
#[derive(Debug, Serialize)]
pub struct AnnealingReport {
    /// Cost, iterations and timing
    #[serde(flatten)]
    pub outcome: AnnealingOutcome,
    /// The final portions
    pub portions: Vec<PortionReport>,
    /// The nutrition of the whole plate
    pub total: NutritionVector,
}

impl From<AnnealingResult> for AnnealingReport {
    fn from(value: AnnealingResult) -> Self {
        Self {
            outcome: value.outcome,
            portions: value.portions.iter().map(PortionReport::from).collect(),
            total: SimulatedAnnealing::nutrition_of(&value.portions),
        }
    }
}
