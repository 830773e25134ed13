use plate_core::models::{
    ActivityLevel, Catalog, Category, HealthGoal, ItemId, LookupError, MealItemSpec, Meal,
    Nutrient, NutrientWeights, Serving, Sex, StudentProfile,
};
use serde_json::json;
use time::macros::date;

#[test]
fn profile_from_json() {
    let profile: StudentProfile = serde_json::from_value(json!({
        "height": 165.5,
        "weight": 58,
        "birthdate": "2003-11-20",
        "sex": "female",
        "activity_level": "heavy",
        "health_goal": "athletic_performance",
        "meals": ["breakfast", "lunch", "dinner"],
        "meal_count": 3
    }))
    .unwrap();

    assert_eq!(profile.birthdate, Some(date!(2003 - 11 - 20)));
    assert_eq!(profile.sex, Some(Sex::Female));
    assert_eq!(profile.activity_level, Some(ActivityLevel::Heavy));
    assert_eq!(profile.health_goal, Some(HealthGoal::AthleticPerformance));
    assert_eq!(profile.meals, vec![Meal::Breakfast, Meal::Lunch, Meal::Dinner]);
}

#[test]
fn partial_profile_from_json() {
    let profile: StudentProfile = serde_json::from_value(json!({ "weight": 70.0 })).unwrap();
    assert_eq!(profile.weight, Some(70.0));
    assert_eq!(profile.sex, None);
    assert!(profile.meals.is_empty());
}

#[test]
fn out_of_table_values_are_rejected() {
    let err = serde_json::from_value::<StudentProfile>(json!({ "sex": "unknown" })).unwrap_err();
    assert!(err.to_string().contains("unrecognized sex"));

    assert_eq!(
        "couch_potato".parse::<ActivityLevel>(),
        Err(LookupError {
            kind: "activity level",
            value: "couch_potato".to_owned()
        })
    );
    assert!("get_swole".parse::<HealthGoal>().is_err());
}

#[test]
fn catalog_rows_from_json() {
    let catalog: Catalog = serde_json::from_value(json!([
        { "id": 1, "category": "protein", "portion_volume": 120, "calories": 210, "protein": 24.5 },
        { "id": "dumpling", "category": "grain", "portion_volume": -1, "max_pieces": 6, "calories": 45, "cafeteria_id": "C-12" }
    ]))
    .unwrap();

    let chicken = catalog.find(&ItemId::from(1)).unwrap();
    assert_eq!(chicken.category, Category::Protein);
    assert_eq!(chicken.serving, Serving::Continuous { portion_volume: 120.0 });
    assert_eq!(chicken.nutrition.get(Nutrient::Protein), 24.5);
    assert_eq!(chicken.nutrition.sodium, 0.0);

    let dumpling = catalog.find(&ItemId::from("dumpling")).unwrap();
    assert_eq!(
        dumpling.serving,
        Serving::Discrete {
            piece_volume: 1.0,
            max_pieces: 6
        }
    );
}

#[test]
fn invalid_catalog_rows_are_rejected() {
    assert!(
        serde_json::from_value::<MealItemSpec>(
            json!({ "id": 1, "category": "protein", "portion_volume": 0 })
        )
        .is_err()
    );
    assert!(
        serde_json::from_value::<MealItemSpec>(
            json!({ "id": 1, "category": "dessert", "portion_volume": 10 })
        )
        .is_err()
    );
}

#[test]
fn weights_by_name() {
    let weights: NutrientWeights =
        serde_json::from_value(json!({ "calories": 10.0, "sugar": 2.0 })).unwrap();
    assert_eq!(weights.get(Nutrient::Calories), 10.0);
    assert_eq!(weights.get(Nutrient::Sugar), 2.0);
    assert_eq!(weights.get(Nutrient::TransFat), 0.0);

    let round_trip: NutrientWeights =
        serde_json::from_value(serde_json::to_value(NutrientWeights::default()).unwrap()).unwrap();
    assert_eq!(round_trip, NutrientWeights::default());
}
