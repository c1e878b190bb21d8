//! Venice model listing types and conversion.
//!
//! Handles the `GET /models` response from the Venice API and converts it
//! into [`ModelDescriptor`]s. Venice omits fields freely, so every field is
//! optional and falls back to a conservative default.

use serde::Deserialize;

use crate::types::ModelDescriptor;

/// Context window assumed when the listing does not report one.
pub const DEFAULT_CONTEXT_WINDOW: u32 = 32_768;

/// Output limit assumed when the listing does not report one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Venice `/models` list response.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// A single model entry from the Venice API.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub model_spec: Option<ModelSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelSpec {
    #[serde(default)]
    pub available_context_tokens: Option<u32>,
    #[serde(default)]
    pub max_completion_tokens: Option<u32>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub capabilities: Option<Capabilities>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Prices in USD per million tokens.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pricing {
    #[serde(default)]
    pub input: Option<Price>,
    #[serde(default)]
    pub output: Option<Price>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Price {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Capabilities {
    #[serde(default)]
    pub supports_vision: Option<bool>,
    #[serde(default)]
    pub supports_reasoning: Option<bool>,
    #[serde(default)]
    pub supports_function_calling: Option<bool>,
}

/// Convert a Venice model entry into a [`ModelDescriptor`].
pub(crate) fn into_model_descriptor(entry: ModelEntry) -> ModelDescriptor {
    let spec = entry.model_spec.unwrap_or_default();
    let pricing = spec.pricing.unwrap_or_default();
    let caps = spec.capabilities.unwrap_or_default();

    let usd = |p: Option<Price>| p.and_then(|p| p.usd).unwrap_or(0.0);

    let mut descriptor = ModelDescriptor::new(
        entry.id,
        spec.max_completion_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        spec.available_context_tokens.unwrap_or(DEFAULT_CONTEXT_WINDOW),
    )
    .with_pricing(usd(pricing.input), usd(pricing.output))
    .with_images(caps.supports_vision.unwrap_or(false))
    .with_reasoning(caps.supports_reasoning.unwrap_or(false))
    .with_function_calling(caps.supports_function_calling.unwrap_or(false));

    if let Some(text) = spec.description.or(spec.name) {
        descriptor = descriptor.with_description(text);
    }
    descriptor
}
