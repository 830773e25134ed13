use crate::models::{
    ActivityLevel, DivisionError, HealthGoal, NutritionVector, Sex, StudentProfile, TargetRange,
};
use time::{Date, OffsetDateTime};

/// Daily targets are split evenly across this many meals
pub const MEALS_PER_DAY: f64 = 3.0;

/// An effectively-unbounded limit, for nutrients with no clinically meaningful cap
pub const NO_CAP: f64 = 1e20;

/// Applied on top of the activity multiplier
const SAFETY_FACTOR: f64 = 1.1;

/// Calorie bounds are this fraction either side of the point estimate
const CALORIE_LEEWAY: f64 = 0.15;

const CALORIES_PER_GRAM_FAT: f64 = 9.0;

/// Coefficients of the sex-specific basal energy equation:
/// `base + per_kg * weight + per_cm * height - per_year * age`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasalCoefficients {
    /// The constant term
    pub base: f64,
    /// kcal per kilogram of body weight
    pub per_kg: f64,
    /// kcal per centimeter of height
    pub per_cm: f64,
    /// kcal subtracted per year of age
    pub per_year: f64,
}

impl BasalCoefficients {
    /// Basal energy in kcal/day
    pub fn basal_energy(&self, weight: f64, height: f64, age: i64) -> f64 {
        self.base + self.per_kg * weight + self.per_cm * height - self.per_year * age as f64
    }
}

impl Sex {
    /// The basal energy coefficients for this sex
    pub fn basal_coefficients(self) -> BasalCoefficients {
        let (base, per_kg, per_cm, per_year) = match self {
            Self::Male => (88.362, 13.397, 4.799, 5.677),
            Self::Female => (447.593, 9.247, 3.098, 4.330),
        };
        BasalCoefficients {
            base,
            per_kg,
            per_cm,
            per_year,
        }
    }
}

impl ActivityLevel {
    /// The multiplier from basal to total daily energy
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Mild => 1.3,
            Self::Moderate => 1.5,
            Self::Heavy => 1.7,
            Self::Extreme => 1.9,
        }
    }
}

/// `(lo, hi)` ratios for the macro-nutrient targets.
///
/// Protein and carbohydrate are grams per kilogram of body weight; total and
/// saturated fat are fractions of daily calories (converted to grams at 9 kcal/g).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacroRatios {
    /// Grams of protein per kg
    pub protein: (f64, f64),
    /// Grams of carbohydrate per kg
    pub carbohydrate: (f64, f64),
    /// Fraction of calories from fat
    pub total_fat: (f64, f64),
    /// Fraction of calories from saturated fat
    pub saturated_fat: (f64, f64),
}

impl HealthGoal {
    /// The kcal adjustment applied to the daily point estimate
    pub fn calorie_offset(self) -> f64 {
        match self {
            Self::LoseWeight => -250.0,
            Self::BuildMuscle => 250.0,
            _ => 0.0,
        }
    }

    /// The macro-nutrient ratios for this goal
    pub fn macro_ratios(self) -> MacroRatios {
        let (protein, carbohydrate, total_fat) = match self {
            Self::BuildMuscle => ((1.5, 1.8), (6.0, 6.6), (0.3, 0.35)),
            Self::AthleticPerformance => ((0.9, 1.05), (6.0, 6.6), (0.3, 0.35)),
            Self::LoseWeight => ((1.1, 1.3), (5.0, 5.5), (0.2, 0.25)),
            Self::ImproveTone => ((0.8, 1.0), (6.0, 6.3), (0.25, 0.3)),
            Self::ImproveHealth => ((0.8, 1.0), (5.0, 6.0), (0.2, 0.25)),
        };
        MacroRatios {
            protein,
            carbohydrate,
            total_fat,
            saturated_fat: (0.0, 0.1),
        }
    }
}

/// The daily defaults for every nutrient that is not derived from the profile.
/// The macro-nutrient entries are placeholders and are always overwritten.
pub fn default_daily_range() -> TargetRange {
    let lo = NutritionVector {
        calories: -1.0,
        carbohydrate: -1.0,
        protein: -1.0,
        total_fat: -1.0,
        saturated_fat: -1.0,
        trans_fat: 0.0,
        sugar: -NO_CAP,
        cholesterol: -NO_CAP,
        fiber: 30.0,
        sodium: 1500.0,
        potassium: 3000.0,
        calcium: 1000.0,
        iron: 8.0,
        vitamin_a: 3000.0,
        vitamin_c: 90.0,
        vitamin_d: 600.0,
    };
    let hi = NutritionVector {
        calories: -1.0,
        carbohydrate: -1.0,
        protein: -1.0,
        total_fat: -1.0,
        saturated_fat: -1.0,
        trans_fat: 0.0,
        sugar: 27.0,
        cholesterol: 300.0,
        fiber: NO_CAP,
        sodium: 4000.0,
        potassium: NO_CAP,
        calcium: 2500.0,
        iron: 45.0,
        vitamin_a: 10000.0,
        vitamin_c: 2000.0,
        vitamin_d: 4000.0,
    };
    TargetRange::new(lo, hi)
}

/// Whole years between `birthdate` and `today` (every year counted as 365 days)
pub fn age_on(birthdate: Date, today: Date) -> i64 {
    (today - birthdate).whole_days().div_euclid(365)
}

/// The daily calorie point estimate, before the leeway is applied
pub fn daily_calories(
    sex: Sex,
    activity_level: ActivityLevel,
    health_goal: HealthGoal,
    weight: f64,
    height: f64,
    age: i64,
) -> f64 {
    let basal = sex.basal_coefficients().basal_energy(weight, height, age);
    basal * activity_level.multiplier() * SAFETY_FACTOR + health_goal.calorie_offset()
}

/// Compute the per-meal target range for a profile, measuring age as of today (UTC)
pub fn compute_requirement_range(profile: &StudentProfile) -> Result<TargetRange, RequirementError> {
    compute_requirement_range_on(profile, OffsetDateTime::now_utc().date())
}

/// Compute the per-meal target range for a profile, measuring age as of `today`
pub fn compute_requirement_range_on(
    profile: &StudentProfile,
    today: Date,
) -> Result<TargetRange, RequirementError> {
    use RequirementError::MissingAttribute;

    let activity_level = profile
        .activity_level
        .ok_or(MissingAttribute("activity_level"))?;
    let sex = profile.sex.ok_or(MissingAttribute("sex"))?;
    let weight = profile.weight.ok_or(MissingAttribute("weight"))?;
    let height = profile.height.ok_or(MissingAttribute("height"))?;
    let birthdate = profile.birthdate.ok_or(MissingAttribute("birthdate"))?;
    let health_goal = profile.health_goal.ok_or(MissingAttribute("health_goal"))?;

    let calories = daily_calories(
        sex,
        activity_level,
        health_goal,
        weight,
        height,
        age_on(birthdate, today),
    );
    let ratios = health_goal.macro_ratios();
    let fat_grams = calories / CALORIES_PER_GRAM_FAT;

    let TargetRange { mut lo, mut hi } = default_daily_range();

    lo.calories = calories * (1.0 - CALORIE_LEEWAY);
    hi.calories = calories * (1.0 + CALORIE_LEEWAY);

    lo.protein = ratios.protein.0 * weight;
    hi.protein = ratios.protein.1 * weight;
    lo.carbohydrate = ratios.carbohydrate.0 * weight;
    hi.carbohydrate = ratios.carbohydrate.1 * weight;
    lo.total_fat = ratios.total_fat.0 * fat_grams;
    hi.total_fat = ratios.total_fat.1 * fat_grams;
    lo.saturated_fat = ratios.saturated_fat.0 * fat_grams;
    hi.saturated_fat = ratios.saturated_fat.1 * fat_grams;

    Ok(TargetRange::new(lo, hi).per_meal(MEALS_PER_DAY)?)
}

/// The ways in which a target range cannot be computed for a profile
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RequirementError {
    /// The profile lacks a field the calculation needs
    #[error("student profile missing attribute {0}")]
    MissingAttribute(&'static str),
    /// Daily targets could not be split into meals
    #[error(transparent)]
    Division(#[from] DivisionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use time::macros::date;

    #[test]
    fn test_age_floors() {
        assert_eq!(age_on(date!(1994 - 01 - 01), date!(2024 - 06 - 01)), 30);
        assert_eq!(age_on(date!(2024 - 06 - 01), date!(2024 - 06 - 01)), 0);
        // a birthday in the future floors towards negative infinity
        assert_eq!(age_on(date!(2024 - 06 - 02), date!(2024 - 06 - 01)), -1);
    }

    #[test]
    fn test_known_profile() {
        let profile = StudentProfile {
            height: Some(180.0),
            weight: Some(80.0),
            birthdate: Some(date!(1994 - 01 - 01)),
            sex: Some(Sex::Male),
            activity_level: Some(ActivityLevel::Moderate),
            health_goal: Some(HealthGoal::ImproveHealth),
            ..Default::default()
        };
        let range = compute_requirement_range_on(&profile, date!(2024 - 06 - 01)).unwrap();

        let basal = 88.362 + 13.397 * 80.0 + 4.799 * 180.0 - 5.677 * 30.0;
        let calories = basal * 1.5 * 1.1;
        assert_relative_eq!(range.lo.calories, calories * 0.85 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(range.hi.calories, calories * 1.15 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(range.lo.protein, 0.8 * 80.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(range.hi.carbohydrate, 6.0 * 80.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(range.hi.total_fat, 0.25 * calories / 9.0 / 3.0, max_relative = 1e-12);
        assert_eq!(range.lo.saturated_fat, 0.0);
        assert_relative_eq!(range.lo.fiber, 10.0);
        assert_relative_eq!(range.hi.sugar, 9.0);
    }

    #[test]
    fn test_goal_offsets() {
        let base = daily_calories(
            Sex::Female,
            ActivityLevel::Mild,
            HealthGoal::ImproveTone,
            60.0,
            165.0,
            20,
        );
        let lose = daily_calories(
            Sex::Female,
            ActivityLevel::Mild,
            HealthGoal::LoseWeight,
            60.0,
            165.0,
            20,
        );
        let build = daily_calories(
            Sex::Female,
            ActivityLevel::Mild,
            HealthGoal::BuildMuscle,
            60.0,
            165.0,
            20,
        );
        assert_relative_eq!(base - lose, 250.0, max_relative = 1e-12);
        assert_relative_eq!(build - base, 250.0, max_relative = 1e-12);
    }
}
