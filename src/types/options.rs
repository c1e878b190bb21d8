//! Handler options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::VeniceError;

/// Web search behaviour requested from Venice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebSearchMode {
    /// Venice decides per request
    #[default]
    Auto,
    On,
    Off,
}

impl WebSearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebSearchMode::Auto => "auto",
            WebSearchMode::On => "on",
            WebSearchMode::Off => "off",
        }
    }
}

impl fmt::Display for WebSearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebSearchMode {
    type Err = VeniceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(WebSearchMode::Auto),
            "on" => Ok(WebSearchMode::On),
            "off" => Ok(WebSearchMode::Off),
            other => Err(VeniceError::InvalidInput(format!(
                "unknown web search mode '{other}' (expected auto, on or off)"
            ))),
        }
    }
}

/// Options for [`VeniceHandler`](crate::providers::VeniceHandler).
///
/// Every Venice toggle is optional; only toggles that were explicitly set
/// are sent with the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeniceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Overrides the production endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search: Option<WebSearchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_search_results_in_stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_venice_system_prompt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_thinking_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_thinking: Option<bool>,
}

impl VeniceOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model_id = Some(model.into());
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn web_search(mut self, mode: WebSearchMode) -> Self {
        self.web_search = Some(mode);
        self
    }

    pub fn include_search_results_in_stream(mut self, include: bool) -> Self {
        self.include_search_results_in_stream = Some(include);
        self
    }

    pub fn include_venice_system_prompt(mut self, include: bool) -> Self {
        self.include_venice_system_prompt = Some(include);
        self
    }

    pub fn strip_thinking_response(mut self, strip: bool) -> Self {
        self.strip_thinking_response = Some(strip);
        self
    }

    pub fn disable_thinking(mut self, disable: bool) -> Self {
        self.disable_thinking = Some(disable);
        self
    }
}
