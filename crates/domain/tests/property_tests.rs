//! Property tests for cell parsing, score formatting, and metadata loading

use graph_challenge_domain::{
    format_score, is_missing, round_score, ClassLabel, Dataset, DatasetScores, GraphId, Metadata,
    ModelType,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn integer_cells_parse_to_themselves(value in any::<i64>()) {
        prop_assert_eq!(GraphId::parse_cell(&value.to_string()), Some(GraphId::new(value)));
        prop_assert_eq!(ClassLabel::parse_cell(&format!("  {}  ", value)), Some(ClassLabel::new(value)));
    }

    #[test]
    fn integral_floats_parse_as_integers(value in -1_000_000i64..1_000_000) {
        prop_assert_eq!(GraphId::parse_cell(&format!("{}.0", value)), Some(GraphId::new(value)));
    }

    #[test]
    fn fractional_floats_never_parse(whole in -1000i64..1000, frac in 1u32..1000) {
        let cell = format!("{}.{:03}", whole, frac);
        prop_assert_eq!(ClassLabel::parse_cell(&cell), None);
    }

    #[test]
    fn numbers_are_never_missing(value in any::<i64>()) {
        prop_assert!(!is_missing(&value.to_string()));
    }

    #[test]
    fn rounding_matches_formatting(value in 0.0f64..=1.0, digits in 1u32..=15) {
        let rounded = round_score(value, digits);
        prop_assert_eq!(format_score(rounded, digits), format_score(value, digits));
        prop_assert!((rounded - value).abs() <= 0.5 * 10f64.powi(-(digits as i32)) + f64::EPSILON);
    }

    #[test]
    fn combined_score_stays_between_dataset_scores(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let scores = DatasetScores::new()
            .with(Dataset::Proteins, a)
            .with(Dataset::Mutag, b);

        let combined = scores.combined().unwrap();

        prop_assert!(combined >= a.min(b) - f64::EPSILON);
        prop_assert!(combined <= a.max(b) + f64::EPSILON);
        prop_assert!((0.0..=1.0).contains(&combined));
    }

    #[test]
    fn metadata_accepts_any_non_blank_text(
        team in "[a-z][a-z0-9-]{0,15}",
        model in "[A-Za-z0-9 _-]{1,20}",
        runtime in 0u32..10_000,
    ) {
        prop_assume!(!model.trim().is_empty());
        let value = serde_json::json!({
            "team": team,
            "model": model,
            "model_type": "human+llm",
            "runtime_minutes": runtime,
        });

        let metadata = Metadata::from_json(&value).unwrap();

        prop_assert_eq!(metadata.team, team);
        prop_assert_eq!(metadata.model, model.trim());
        prop_assert_eq!(metadata.model_type, ModelType::HumanPlusLlm);
        prop_assert_eq!(metadata.runtime_minutes, runtime.to_string());
    }
}
