use super::{DivisionError, Nutrient, NutrientWeights, NutritionVector};

/// The acceptable intake for a meal, as a closed interval per nutrient.
///
/// Targets are read-only for the duration of an optimization run; the helpers
/// below all return new values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRange {
    /// The lower bound of every nutrient
    pub lo: NutritionVector,
    /// The upper bound of every nutrient
    pub hi: NutritionVector,
}

impl TargetRange {
    /// Create a target range from its bounds
    pub fn new(lo: NutritionVector, hi: NutritionVector) -> Self {
        Self { lo, hi }
    }

    /// A range which every intake satisfies
    pub fn unbounded() -> Self {
        Self {
            lo: NutritionVector::from_fn(|_| f64::NEG_INFINITY),
            hi: NutritionVector::from_fn(|_| f64::INFINITY),
        }
    }

    /// Return a copy with the interval for one nutrient replaced
    pub fn with_bounds(self, nutrient: Nutrient, lo: f64, hi: f64) -> Self {
        Self {
            lo: self.lo.with(nutrient, lo),
            hi: self.hi.with(nutrient, hi),
        }
    }

    /// Split a daily range evenly across `meals` meals
    pub fn per_meal(&self, meals: f64) -> Result<Self, DivisionError> {
        Ok(Self {
            lo: self.lo.divide(meals)?,
            hi: self.hi.divide(meals)?,
        })
    }

    /// Squared distance from `value` to the interval of `nutrient` (zero inside the interval)
    pub fn distance_sq(&self, nutrient: Nutrient, value: f64) -> f64 {
        let (lo, hi) = (self.lo.get(nutrient), self.hi.get(nutrient));
        if value < lo {
            (lo - value).powi(2)
        } else if hi < value {
            (value - hi).powi(2)
        } else {
            0.0
        }
    }

    /// Whether every nutrient of `total` lies inside its interval
    pub fn contains(&self, total: &NutritionVector) -> bool {
        total
            .iter()
            .all(|(nutrient, value)| self.distance_sq(nutrient, value) == 0.0)
    }

    /// The weighted sum of squared distances from `total` to this range.
    ///
    /// Nutrients with a zero weight are skipped outright, so an effectively
    /// unbounded sentinel can never leak an infinity into the sum.
    pub fn penalty(&self, total: &NutritionVector, weights: &NutrientWeights) -> f64 {
        weights
            .active()
            .map(|(nutrient, weight)| weight * self.distance_sq(nutrient, total.get(nutrient)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calorie_range() -> TargetRange {
        TargetRange::unbounded().with_bounds(Nutrient::Calories, 300.0, 400.0)
    }

    #[test]
    fn test_distance_inside_and_outside() {
        let range = calorie_range();
        assert_eq!(range.distance_sq(Nutrient::Calories, 350.0), 0.0);
        assert_eq!(range.distance_sq(Nutrient::Calories, 300.0), 0.0);
        assert_eq!(range.distance_sq(Nutrient::Calories, 290.0), 100.0);
        assert_eq!(range.distance_sq(Nutrient::Calories, 403.0), 9.0);
        assert_eq!(range.distance_sq(Nutrient::Protein, 1e9), 0.0);
    }

    #[test]
    fn test_penalty_weights_each_nutrient() {
        let range = calorie_range().with_bounds(Nutrient::Protein, 10.0, 20.0);
        let total = NutritionVector::default()
            .with(Nutrient::Calories, 410.0)
            .with(Nutrient::Protein, 8.0);
        let weights = NutrientWeights::zero()
            .with(Nutrient::Calories, 2.0)
            .with(Nutrient::Protein, 0.5);
        assert_eq!(range.penalty(&total, &weights), 2.0 * 100.0 + 0.5 * 4.0);
        assert!(!range.contains(&total));
    }

    #[test]
    fn test_per_meal() {
        let daily = calorie_range();
        let meal = daily.per_meal(4.0).unwrap();
        assert_eq!(meal.lo.calories, 75.0);
        assert_eq!(meal.hi.calories, 100.0);
        assert!(daily.per_meal(0.0).is_err());
    }
}
