use time::Date;

closed_enum! {
    /// Biological sex, as used by the basal energy equations
    Sex("sex") {
        /// Male coefficients
        Male => "male",
        /// Female coefficients
        Female => "female",
    }
}

closed_enum! {
    /// Habitual activity level
    ActivityLevel("activity level") {
        /// Little or no exercise
        Sedentary => "sedentary",
        /// Light exercise
        Mild => "mild",
        /// Moderate exercise
        Moderate => "moderate",
        /// Hard exercise
        Heavy => "heavy",
        /// Very hard exercise or physical work
        Extreme => "extreme",
    }
}

closed_enum! {
    /// What the student wants their diet to achieve
    HealthGoal("health goal") {
        /// Lose body weight
        LoseWeight => "lose_weight",
        /// Gain muscle mass
        BuildMuscle => "build_muscle",
        /// Fuel training and competition
        AthleticPerformance => "athletic_performance",
        /// Improve muscle tone
        ImproveTone => "improve_tone",
        /// General health
        ImproveHealth => "improve_health",
    }
}

closed_enum! {
    /// A meal slot in the day
    Meal("meal") {
        #[allow(missing_docs)]
        Breakfast => "breakfast",
        #[allow(missing_docs)]
        MorningSnack => "morning_snack",
        #[allow(missing_docs)]
        Lunch => "lunch",
        #[allow(missing_docs)]
        AfternoonSnack => "afternoon_snack",
        #[allow(missing_docs)]
        Dinner => "dinner",
        #[allow(missing_docs)]
        EveningSnack => "evening_snack",
    }
}

/// The biometric profile a menu is personalized for.
///
/// The biometric fields are optional so that incomplete records can be loaded;
/// the requirement calculator reports which one is missing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentProfile {
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Date of birth
    pub birthdate: Option<Date>,
    /// Biological sex
    pub sex: Option<Sex>,
    /// Habitual activity level
    pub activity_level: Option<ActivityLevel>,
    /// Dietary goal
    pub health_goal: Option<HealthGoal>,
    /// The meals the student eats
    #[cfg_attr(feature = "serde", serde(default))]
    pub meals: Vec<Meal>,
    /// The number of meals per day the student reported
    pub meal_count: Option<u32>,
}
