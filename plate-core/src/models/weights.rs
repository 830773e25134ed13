use super::{NUTRIENT_COUNT, Nutrient, NutritionVector};

/// Weighting coefficients for the portion cost function, one per nutrient.
///
/// Coefficients are addressed by [`Nutrient`] rather than by list position, and
/// serialize as a map keyed by nutrient name (missing nutrients weigh zero).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct NutrientWeights(NutritionVector);

impl Default for NutrientWeights {
    /// Calories and the macro-nutrients dominate; micro-nutrients and vitamins
    /// are tracked but not weighted.
    fn default() -> Self {
        Self::from_iter([
            (Nutrient::Calories, 100_000.0),
            (Nutrient::Carbohydrate, 8.0),
            (Nutrient::Protein, 20.0),
            (Nutrient::TotalFat, 50.0),
            (Nutrient::SaturatedFat, 1.5 * 50.0),
            (Nutrient::TransFat, 50.0),
        ])
    }
}

impl NutrientWeights {
    /// Weights which are zero for every nutrient
    pub fn zero() -> Self {
        Self(NutritionVector::default())
    }

    /// The coefficient for a nutrient
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(nutrient)
    }

    /// Return a copy with one coefficient replaced
    pub fn with(self, nutrient: Nutrient, weight: f64) -> Self {
        Self(self.0.with(nutrient, weight))
    }

    /// Iterate over the nutrients that carry a nonzero weight
    pub fn active(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        self.0.iter().filter(|(_, weight)| *weight != 0.0)
    }
}

impl FromIterator<(Nutrient, f64)> for NutrientWeights {
    fn from_iter<I: IntoIterator<Item = (Nutrient, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::zero(), |acc, (nutrient, weight)| acc.with(nutrient, weight))
    }
}

impl TryFrom<&[f64]> for NutrientWeights {
    type Error = ConfigurationError;

    /// Interpret an ordered list of coefficients, one per nutrient in the order of [`Nutrient::ALL`]
    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        if value.len() != NUTRIENT_COUNT {
            return Err(ConfigurationError::WeightCount {
                expected: NUTRIENT_COUNT,
                found: value.len(),
            });
        }
        Ok(Nutrient::ALL.into_iter().zip(value.iter().copied()).collect())
    }
}

/// The ways in which solver configuration can be malformed
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The coefficient list does not cover every nutrient exactly once
    #[error("expected {expected} nutrient weights, found {found}")]
    WeightCount {
        /// The number of tracked nutrients
        expected: usize,
        /// The number of weights supplied
        found: usize,
    },
    /// The cooling factor must lie strictly between 0 and 1
    #[error("cooling factor must be in (0, 1), got {0}")]
    CoolingFactor(f64),
    /// The stopping temperature must be positive
    #[error("smallest temperature must be positive, got {0}")]
    SmallestTemperature(f64),
    /// Seeds are non-negative, with -1 standing for an unseeded run
    #[error("seed must be non-negative or -1, got {0}")]
    Seed(i64),
    /// Each section must offer at least one item
    #[error("the number of items chosen per section must be at least 1")]
    SubsetSize,
    /// Container volumes must be finite and non-negative
    #[error("container volume must be finite and non-negative, got {0}")]
    ContainerVolume(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_favor_calories() {
        let weights = NutrientWeights::default();
        assert_eq!(weights.get(Nutrient::Calories), 100_000.0);
        assert_eq!(weights.get(Nutrient::SaturatedFat), 75.0);
        assert_eq!(weights.get(Nutrient::TransFat), 50.0);
        assert_eq!(weights.get(Nutrient::Sugar), 0.0);
        assert_eq!(weights.active().count(), 6);
    }

    #[test]
    fn test_positional_weights_are_independent() {
        let values: Vec<f64> = (1..=16).map(f64::from).collect();
        let weights = NutrientWeights::try_from(values.as_slice()).unwrap();
        // trans fat and sugar each keep their own coefficient
        assert_eq!(weights.get(Nutrient::TransFat), 6.0);
        assert_eq!(weights.get(Nutrient::Sugar), 7.0);
        assert_eq!(weights.get(Nutrient::VitaminD), 16.0);
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            NutrientWeights::try_from([1.0; 15].as_slice()).unwrap_err(),
            ConfigurationError::WeightCount {
                expected: 16,
                found: 15
            }
        );
    }
}
