use plate_core::models::{Category, ItemId, Map, Nutrient, PlateSection};
use plate_solver::{
    AnnealingOutcome, AnnealingSettings, PlateLayout, SectionChoice, Selection, SolverParams,
    Volume,
};
use serde_json::json;
use std::time::Duration;

#[test]
fn partial_params_fill_defaults() {
    let params: SolverParams = serde_json::from_value(json!({
        "annealing": { "alpha": 0.95, "seed": -1 },
        "layout": { "large": 0 },
        "weights": { "calories": 1.0, "sugar": 2.0 },
        "choose_count": 2
    }))
    .unwrap();

    assert_eq!(params.annealing.alpha(), 0.95);
    assert_eq!(params.annealing.smallest_temp(), 0.01);
    assert_eq!(params.annealing.seed(), None);
    assert_eq!(params.layout, PlateLayout::new(0.0, 270.0).unwrap());
    assert_eq!(params.weights.get(Nutrient::Sugar), 2.0);
    assert_eq!(params.weights.get(Nutrient::Protein), 0.0);
    assert_eq!(params.choose_count, 2);

    let defaults: SolverParams = serde_json::from_value(json!({})).unwrap();
    assert_eq!(defaults, SolverParams::default());
}

#[test]
fn invalid_params_are_rejected() {
    for invalid in [
        json!({ "annealing": { "alpha": 1.5 } }),
        json!({ "annealing": { "smallest_temp": 0.0 } }),
        json!({ "layout": { "small": -270.0 } }),
    ] {
        assert!(serde_json::from_value::<SolverParams>(invalid).is_err());
    }
}

#[test]
fn settings_round_trip() {
    let settings = AnnealingSettings::new(0.98, 0.02, Some(42)).unwrap();
    let value = serde_json::to_value(settings).unwrap();
    assert_eq!(value, json!({ "alpha": 0.98, "smallest_temp": 0.02, "seed": 42 }));
    assert_eq!(
        serde_json::from_value::<AnnealingSettings>(value).unwrap(),
        settings
    );
}

#[test]
fn largest_seed_survives_round_trip() {
    let settings = AnnealingSettings::default().with_seed(Some(u64::MAX));
    let value = serde_json::to_value(settings).unwrap();
    assert_eq!(value["seed"], json!(u64::MAX));

    let restored: AnnealingSettings = serde_json::from_value(value).unwrap();
    assert_eq!(restored.seed(), Some(u64::MAX));

    let unseeded = settings.with_seed(None);
    assert_eq!(serde_json::to_value(unseeded).unwrap()["seed"], json!(-1));
}

#[test]
fn only_minus_one_is_unseeded() {
    let invalid = json!({ "alpha": 0.9, "smallest_temp": 0.01, "seed": -2 });
    assert!(serde_json::from_value::<AnnealingSettings>(invalid).is_err());
}

#[test]
fn selection_serializes_by_section() {
    let mut sections = Map::default();
    sections.insert(
        PlateSection::Large,
        SectionChoice {
            category: Category::Grain,
            items: vec![ItemId::from(3), ItemId::from("rice-7")],
        },
    );
    let selection = Selection {
        sections,
        total_cost: 12.5,
        elapsed: Duration::from_millis(1500),
        annealing_runs: 8,
    };

    let value = serde_json::to_value(&selection).unwrap();
    assert_eq!(
        value,
        json!({
            "sections": { "large": { "category": "grain", "items": [3, "rice-7"] } },
            "total_cost": 12.5,
            "elapsed": "1s 500ms",
            "annealing_runs": 8
        })
    );
    assert_eq!(serde_json::from_value::<Selection>(value).unwrap(), selection);
}

#[test]
fn outcomes_and_volumes() {
    let outcome = AnnealingOutcome {
        final_cost: 0.25,
        elapsed: Duration::from_secs(2),
        iterations: 390,
    };
    assert_eq!(
        serde_json::to_value(outcome).unwrap(),
        json!({ "final_cost": 0.25, "elapsed": "2s", "iterations": 390 })
    );
    assert_eq!(
        serde_json::to_value(Volume::Discrete(3)).unwrap(),
        json!({ "discrete": 3 })
    );
}
