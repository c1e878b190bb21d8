//! Static Venice model catalog and model resolution.
//!
//! The catalog holds limits, prices and capability flags for the models this
//! crate knows about. Lookups never fail: an unknown or absent id resolves to
//! [`DEFAULT_MODEL_ID`].

use crate::types::{ModelDescriptor, ResolvedModel};

/// Model used when the requested id is absent or unknown.
pub const DEFAULT_MODEL_ID: &str = "venice-uncensored";

struct CatalogEntry {
    id: &'static str,
    max_tokens: u32,
    context_window: u32,
    supports_images: bool,
    supports_prompt_cache: bool,
    supports_reasoning: bool,
    supports_function_calling: bool,
    input_price: f64,
    output_price: f64,
    description: &'static str,
}

impl CatalogEntry {
    fn descriptor(&self) -> ModelDescriptor {
        ModelDescriptor::new(self.id, self.max_tokens, self.context_window)
            .with_pricing(self.input_price, self.output_price)
            .with_images(self.supports_images)
            .with_prompt_cache(self.supports_prompt_cache)
            .with_reasoning(self.supports_reasoning)
            .with_function_calling(self.supports_function_calling)
            .with_description(self.description)
    }
}

const VENICE_MODELS: &[CatalogEntry] = &[
    CatalogEntry {
        id: "qwen3-235b",
        max_tokens: 32_768,
        context_window: 131_072,
        supports_images: false,
        supports_prompt_cache: true,
        supports_reasoning: true,
        supports_function_calling: false,
        input_price: 0.9,
        output_price: 4.5,
        description: "Venice Large 1.1 - Most powerful flagship model with advanced reasoning capabilities",
    },
    CatalogEntry {
        id: "mistral-31-24b",
        max_tokens: 32_768,
        context_window: 131_072,
        supports_images: true,
        supports_prompt_cache: true,
        supports_reasoning: false,
        supports_function_calling: true,
        input_price: 0.5,
        output_price: 2.0,
        description: "Venice Medium (3.1) - Vision + function calling",
    },
    CatalogEntry {
        id: "qwen3-4b",
        max_tokens: 8192,
        context_window: 40_960,
        supports_images: false,
        supports_prompt_cache: true,
        supports_reasoning: true,
        supports_function_calling: false,
        input_price: 0.05,
        output_price: 0.15,
        description: "Venice Small - Fast, affordable for most tasks",
    },
    CatalogEntry {
        id: "venice-uncensored",
        max_tokens: 8192,
        context_window: 32_768,
        supports_images: false,
        supports_prompt_cache: true,
        supports_reasoning: false,
        supports_function_calling: false,
        input_price: 0.2,
        output_price: 0.9,
        description: "Venice Uncensored 1.1 - No content filtering",
    },
];

fn entry(id: &str) -> Option<&'static CatalogEntry> {
    VENICE_MODELS.iter().find(|e| e.id == id)
}

/// Ids of all catalog models, in catalog order.
pub fn model_ids() -> impl Iterator<Item = &'static str> {
    VENICE_MODELS.iter().map(|e| e.id)
}

/// Descriptors for all catalog models, in catalog order.
pub fn models() -> Vec<ModelDescriptor> {
    VENICE_MODELS.iter().map(CatalogEntry::descriptor).collect()
}

/// Exact catalog lookup.
pub fn lookup(id: &str) -> Option<ModelDescriptor> {
    entry(id).map(CatalogEntry::descriptor)
}

/// Descriptor of [`DEFAULT_MODEL_ID`].
pub fn default_model() -> ResolvedModel {
    let info = lookup(DEFAULT_MODEL_ID).unwrap_or_else(|| {
        // the catalog always contains the default id; this keeps lookups total
        ModelDescriptor::new(DEFAULT_MODEL_ID, 8192, 32_768)
    });
    ResolvedModel {
        id: DEFAULT_MODEL_ID.to_string(),
        info,
    }
}

/// Resolve a requested model id against the static catalog.
///
/// Known ids resolve to their own entry. Unknown or absent ids resolve to the
/// default model, so callers never have to handle a missing entry.
pub fn resolve_model(requested: Option<&str>) -> ResolvedModel {
    match requested.and_then(|id| entry(id).map(|e| (id, e))) {
        Some((id, e)) => ResolvedModel {
            id: id.to_string(),
            info: e.descriptor(),
        },
        None => default_model(),
    }
}

/// Pair an externally supplied descriptor with its id, bypassing the catalog.
///
/// Used when the caller already has descriptor data, e.g. from
/// [`VeniceHandler::list_models`](crate::providers::VeniceHandler::list_models).
pub fn resolve_with_descriptor(id: impl Into<String>, descriptor: ModelDescriptor) -> ResolvedModel {
    ResolvedModel {
        id: id.into(),
        info: descriptor,
    }
}

/// Whether the model accepts the thinking controls.
pub fn is_reasoning_model(id: &str) -> bool {
    entry(id).is_some_and(|e| e.supports_reasoning)
}

pub fn supports_images(id: &str) -> bool {
    entry(id).is_some_and(|e| e.supports_images)
}

pub fn supports_function_calling(id: &str) -> bool {
    entry(id).is_some_and(|e| e.supports_function_calling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_in_catalog() {
        assert!(lookup(DEFAULT_MODEL_ID).is_some());
        assert_eq!(default_model().id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let ids: Vec<_> = model_ids().collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id), "duplicate id {id}");
        }
        assert_eq!(models().len(), ids.len());
    }

    #[test]
    fn capability_columns() {
        assert!(is_reasoning_model("qwen3-4b"));
        assert!(is_reasoning_model("qwen3-235b"));
        assert!(!is_reasoning_model("mistral-31-24b"));
        assert!(supports_images("mistral-31-24b"));
        assert!(supports_function_calling("mistral-31-24b"));
        assert!(!supports_images("no-such-model"));
    }
}
