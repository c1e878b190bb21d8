//! Model descriptor types.
//!
//! Describes a Venice model's limits, capabilities and pricing.

use serde::{Deserialize, Serialize};

/// Static description of a Venice model.
///
/// Prices are USD per million tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identifier (e.g., "venice-uncensored", "qwen3-235b").
    pub id: String,
    /// Maximum output tokens.
    pub max_tokens: u32,
    /// Maximum context window in tokens.
    pub context_window: u32,
    pub supports_images: bool,
    pub supports_prompt_cache: bool,
    /// Accepts the thinking controls (`strip_thinking_response`, `disable_thinking`).
    #[serde(default)]
    pub supports_reasoning: bool,
    #[serde(default)]
    pub supports_function_calling: bool,
    /// Input price per million tokens.
    pub input_price: f64,
    /// Output price per million tokens.
    pub output_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelDescriptor {
    /// Create a descriptor with zero prices and no capabilities.
    pub fn new(id: impl Into<String>, max_tokens: u32, context_window: u32) -> Self {
        Self {
            id: id.into(),
            max_tokens,
            context_window,
            supports_images: false,
            supports_prompt_cache: false,
            supports_reasoning: false,
            supports_function_calling: false,
            input_price: 0.0,
            output_price: 0.0,
            description: None,
        }
    }

    /// Set per-million-token input and output prices.
    pub fn with_pricing(mut self, input_price: f64, output_price: f64) -> Self {
        self.input_price = input_price;
        self.output_price = output_price;
        self
    }

    pub fn with_images(mut self, supported: bool) -> Self {
        self.supports_images = supported;
        self
    }

    pub fn with_prompt_cache(mut self, supported: bool) -> Self {
        self.supports_prompt_cache = supported;
        self
    }

    pub fn with_reasoning(mut self, supported: bool) -> Self {
        self.supports_reasoning = supported;
        self
    }

    pub fn with_function_calling(mut self, supported: bool) -> Self {
        self.supports_function_calling = supported;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Cost in USD of the given token counts at this model's prices.
    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        input_tokens as f64 * self.input_price / 1_000_000.0
            + output_tokens as f64 * self.output_price / 1_000_000.0
    }
}

/// A model id paired with the descriptor that serves it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
    pub id: String,
    pub info: ModelDescriptor,
}
