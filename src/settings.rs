//! User-editable Venice settings.
//!
//! Settings are kept separately for the two working modes (`plan` and
//! `act`), so a user can e.g. plan with a large reasoning model and act with
//! a cheaper one. [`VeniceSettings::visible_fields`] mirrors which controls a
//! settings form should offer for the current state, and
//! [`VeniceSettings::to_options`] produces the handler configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::types::{ResolvedModel, VeniceOptions, WebSearchMode};
use crate::VeniceError;

/// Working mode whose settings are being read or edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Plan,
    #[default]
    Act,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Plan => "plan",
            Mode::Act => "act",
        })
    }
}

impl FromStr for Mode {
    type Err = VeniceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" => Ok(Mode::Plan),
            "act" => Ok(Mode::Act),
            other => Err(VeniceError::InvalidInput(format!(
                "unknown mode '{other}' (expected plan or act)"
            ))),
        }
    }
}

/// Settings for one mode. Unset values fall back to defaults when read and
/// are left out of requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search: Option<WebSearchMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_search_results_in_stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_venice_system_prompt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_thinking_response: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_thinking: Option<bool>,
}

/// A control on the Venice settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    ApiKey,
    Model,
    WebSearch,
    IncludeSearchResultsInStream,
    IncludeVeniceSystemPrompt,
    StripThinkingResponse,
    DisableThinking,
}

impl SettingsField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::ApiKey => "Venice API Key",
            SettingsField::Model => "Model",
            SettingsField::WebSearch => "Web Search",
            SettingsField::IncludeSearchResultsInStream => "Include search results in stream",
            SettingsField::IncludeVeniceSystemPrompt => "Include Venice system prompt",
            SettingsField::StripThinkingResponse => "Strip thinking from response",
            SettingsField::DisableThinking => "Disable thinking mode",
        }
    }
}

/// Venice provider settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VeniceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub plan: ModeSettings,
    #[serde(default)]
    pub act: ModeSettings,
}

impl VeniceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self, mode: Mode) -> &ModeSettings {
        match mode {
            Mode::Plan => &self.plan,
            Mode::Act => &self.act,
        }
    }

    pub fn mode_mut(&mut self, mode: Mode) -> &mut ModeSettings {
        match mode {
            Mode::Plan => &mut self.plan,
            Mode::Act => &mut self.act,
        }
    }

    /// Set the API key; an empty string clears it.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
    }

    pub fn set_model(&mut self, mode: Mode, model_id: impl Into<String>) {
        self.mode_mut(mode).model_id = Some(model_id.into());
    }

    pub fn set_web_search(&mut self, mode: Mode, web_search: WebSearchMode) {
        self.mode_mut(mode).web_search = Some(web_search);
    }

    pub fn set_include_search_results_in_stream(&mut self, mode: Mode, include: bool) {
        self.mode_mut(mode).include_search_results_in_stream = Some(include);
    }

    pub fn set_include_venice_system_prompt(&mut self, mode: Mode, include: bool) {
        self.mode_mut(mode).include_venice_system_prompt = Some(include);
    }

    pub fn set_strip_thinking_response(&mut self, mode: Mode, strip: bool) {
        self.mode_mut(mode).strip_thinking_response = Some(strip);
    }

    pub fn set_disable_thinking(&mut self, mode: Mode, disable: bool) {
        self.mode_mut(mode).disable_thinking = Some(disable);
    }

    /// The model selected for `mode`, normalized through the catalog.
    pub fn selected_model(&self, mode: Mode) -> ResolvedModel {
        catalog::resolve_model(self.mode(mode).model_id.as_deref())
    }

    /// Web search setting as displayed (unset reads as `auto`).
    pub fn web_search(&self, mode: Mode) -> WebSearchMode {
        self.mode(mode).web_search.unwrap_or_default()
    }

    /// Controls to show for `mode`, in form order.
    ///
    /// The search-results toggle is hidden while web search is off, and the
    /// thinking toggles only appear for reasoning models.
    pub fn visible_fields(&self, mode: Mode) -> Vec<SettingsField> {
        let mut fields = vec![
            SettingsField::ApiKey,
            SettingsField::Model,
            SettingsField::WebSearch,
        ];
        if self.web_search(mode) != WebSearchMode::Off {
            fields.push(SettingsField::IncludeSearchResultsInStream);
        }
        fields.push(SettingsField::IncludeVeniceSystemPrompt);
        if self.selected_model(mode).info.supports_reasoning {
            fields.push(SettingsField::StripThinkingResponse);
            fields.push(SettingsField::DisableThinking);
        }
        fields
    }

    /// Handler options for `mode`. Only explicitly set toggles carry over.
    pub fn to_options(&self, mode: Mode) -> VeniceOptions {
        let m = self.mode(mode);
        VeniceOptions {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model_id: m.model_id.clone(),
            max_tokens: self.max_tokens,
            web_search: m.web_search,
            include_search_results_in_stream: m.include_search_results_in_stream,
            include_venice_system_prompt: m.include_venice_system_prompt,
            strip_thinking_response: m.strip_thinking_response,
            disable_thinking: m.disable_thinking,
        }
    }
}
