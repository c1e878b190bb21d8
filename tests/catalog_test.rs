//! Tests for the static model catalog and model resolution.

use venice::ModelDescriptor;
use venice::catalog::{self, DEFAULT_MODEL_ID};

#[test]
fn known_id_resolves_to_itself() {
    for id in catalog::model_ids() {
        let resolved = catalog::resolve_model(Some(id));
        assert_eq!(resolved.id, id);
        assert_eq!(resolved.info.id, id);
    }
}

#[test]
fn absent_or_unknown_id_resolves_to_default() {
    for requested in [None, Some(""), Some("gpt-4o"), Some("QWEN3-4B")] {
        let resolved = catalog::resolve_model(requested);
        assert_eq!(resolved.id, DEFAULT_MODEL_ID, "requested {requested:?}");
        assert_eq!(resolved.info, catalog::default_model().info);
    }
}

#[test]
fn catalog_values() {
    let large = catalog::lookup("qwen3-235b").unwrap();
    assert_eq!(large.context_window, 131_072);
    assert_eq!(large.max_tokens, 32_768);
    assert_eq!((large.input_price, large.output_price), (0.9, 4.5));
    assert!(large.supports_reasoning);

    let medium = catalog::lookup("mistral-31-24b").unwrap();
    assert!(medium.supports_images);
    assert!(medium.supports_function_calling);
    assert!(!medium.supports_reasoning);

    let small = catalog::lookup("qwen3-4b").unwrap();
    assert_eq!(small.context_window, 40_960);
    assert_eq!((small.input_price, small.output_price), (0.05, 0.15));

    let uncensored = catalog::lookup("venice-uncensored").unwrap();
    assert_eq!(uncensored.context_window, 32_768);
    assert_eq!((uncensored.input_price, uncensored.output_price), (0.2, 0.9));
}

#[test]
fn every_entry_fits_its_context_window() {
    for model in catalog::models() {
        assert!(model.max_tokens <= model.context_window, "{}", model.id);
        assert!(model.input_price >= 0.0 && model.output_price >= 0.0);
    }
}

#[test]
fn cost_per_million_tokens() {
    let model = catalog::lookup("qwen3-235b").unwrap();
    assert!((model.cost(1_000_000, 0) - 0.9).abs() < 1e-12);
    assert!((model.cost(0, 1_000_000) - 4.5).abs() < 1e-12);
    assert_eq!(model.cost(0, 0), 0.0);
}

#[test]
fn external_descriptor_bypasses_catalog() {
    let descriptor = ModelDescriptor::new("private-model", 1024, 4096).with_pricing(9.0, 9.0);
    let resolved = catalog::resolve_with_descriptor("private-model", descriptor.clone());
    assert_eq!(resolved.id, "private-model");
    assert_eq!(resolved.info, descriptor);
}
