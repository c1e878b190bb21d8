//! Venice chat-completions client.
//!
//! Venice exposes an OpenAI-compatible API with an extra
//! `venice_parameters` object for provider-specific switches (web search,
//! Venice's own system prompt, thinking controls on reasoning models).
//! See: <https://docs.venice.ai/api-reference/endpoint/chat/completions>

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::StreamExt;
use moka::future::Cache;
use reqwest::Client;
use serde::Serialize;
use tracing::{Span, debug, info, instrument};

use super::traits::{ApiHandler, ChunkStream};
use super::venice_models::{ModelsResponse, into_model_descriptor};
use crate::catalog;
use crate::convert::{VeniceMessage, to_venice_messages};
use crate::stream::VeniceStreamDecoder;
use crate::telemetry;
use crate::types::{
    Message, ModelDescriptor, ResolvedModel, StreamChunk, VeniceOptions, WebSearchMode,
};
use crate::{Result, VeniceError};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.venice.ai/api/v1";

/// How long a fetched model listing is reused.
const MODEL_LIST_TTL: Duration = Duration::from_secs(600);

/// Streaming client for the Venice chat-completions API.
///
/// Construction validates configuration and never touches the network:
///
/// ```rust
/// use venice::{VeniceError, VeniceOptions};
/// use venice::providers::VeniceHandler;
///
/// let err = VeniceHandler::new(VeniceOptions::default()).err().unwrap();
/// assert!(matches!(err, VeniceError::Configuration(_)));
/// ```
#[derive(Clone)]
pub struct VeniceHandler {
    api_key: String,
    base_url: String,
    options: VeniceOptions,
    http: Client,
    /// Descriptor supplied by the caller instead of the static catalog.
    model_override: Option<ResolvedModel>,
    models_cache: Cache<String, Arc<Vec<ModelDescriptor>>>,
}

impl VeniceHandler {
    /// Create a handler from options.
    ///
    /// Fails with [`VeniceError::Configuration`] when no API key is set.
    pub fn new(options: VeniceOptions) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| VeniceError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Self::with_http_client(options, http)
    }

    /// Create a handler with a shared HTTP client.
    pub fn with_http_client(options: VeniceOptions, http: Client) -> Result<Self> {
        let api_key = options
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| VeniceError::Configuration("Venice API key is required".into()))?
            .to_string();

        let base_url = options
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let models_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(MODEL_LIST_TTL)
            .build();

        Ok(Self {
            api_key,
            base_url,
            options,
            http,
            model_override: None,
            models_cache,
        })
    }

    /// Use an externally supplied descriptor (e.g. from [`list_models`](Self::list_models))
    /// instead of the static catalog.
    pub fn with_model_descriptor(mut self, descriptor: ModelDescriptor) -> Self {
        let id = descriptor.id.clone();
        self.model_override = Some(catalog::resolve_with_descriptor(id, descriptor));
        self
    }

    pub fn options(&self) -> &VeniceOptions {
        &self.options
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The model requests go to, falling back to the catalog default.
    pub fn model(&self) -> ResolvedModel {
        match &self.model_override {
            Some(model) => model.clone(),
            None => catalog::resolve_model(self.options.model_id.as_deref()),
        }
    }

    /// Build the request body for a conversation.
    pub fn build_request(
        &self,
        model: &ResolvedModel,
        system_prompt: &str,
        messages: &[Message],
    ) -> ChatRequest {
        ChatRequest {
            model: model.id.clone(),
            messages: to_venice_messages(system_prompt, messages),
            stream: true,
            stream_options: StreamOptions {
                include_usage: true,
            },
            max_tokens: self.options.max_tokens,
            venice_parameters: VeniceParameters::from_options(&self.options, &model.info),
        }
    }

    /// Send the conversation and stream the response.
    ///
    /// Errors returned here happen before any chunk is produced. A failure
    /// while reading the body is yielded by the stream as
    /// [`VeniceError::TransportInterrupted`]; a chunked body with no bytes at
    /// all is yielded as [`VeniceError::EmptyBody`].
    #[instrument(name = "venice.create_message", skip(self, system_prompt, messages), fields(model = tracing::field::Empty))]
    pub async fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<ChunkStream> {
        let model = self.model();
        Span::current().record("model", model.id.as_str());

        let request = self.build_request(&model, system_prompt, messages);
        let url = format!("{}/chat/completions", self.base_url);
        info!(
            %url,
            messages = request.messages.len(),
            venice_parameters = request.venice_parameters.is_some(),
            "sending chat completion request"
        );

        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| VeniceError::Http(e.to_string()))?;
            check_response(response).await
        }
        .await;
        record_request("create_message", start, result.is_ok());
        let response = result?;

        let model_id = model.id;
        let chunks = VeniceStreamDecoder::new(response.bytes_stream(), model.info).inspect(
            move |item| {
                if let Ok(StreamChunk::Usage(usage)) = item {
                    metrics::counter!(telemetry::TOKENS_TOTAL,
                        "model" => model_id.clone(),
                        "direction" => "prompt",
                    )
                    .increment(usage.input_tokens);
                    metrics::counter!(telemetry::TOKENS_TOTAL,
                        "model" => model_id.clone(),
                        "direction" => "completion",
                    )
                    .increment(usage.output_tokens);
                }
            },
        );

        Ok(Box::pin(chunks))
    }

    /// List models available to this API key.
    ///
    /// Listings are cached for ten minutes per handler (and its clones).
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        if let Some(models) = self.models_cache.get(&self.base_url).await {
            debug!(count = models.len(), "model listing cache hit");
            return Ok(models.as_ref().clone());
        }
        self.refresh_models().await
    }

    /// Fetch the model listing, bypassing and then refreshing the cache.
    #[instrument(name = "venice.list_models", skip(self))]
    pub async fn refresh_models(&self) -> Result<Vec<ModelDescriptor>> {
        let url = format!("{}/models", self.base_url);
        debug!(%url, "fetching model listing");

        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|e| VeniceError::Http(e.to_string()))?;
            let body = check_response(response)
                .await?
                .bytes()
                .await
                .map_err(|e| VeniceError::Http(e.to_string()))?;
            Ok::<_, VeniceError>(serde_json::from_slice::<ModelsResponse>(&body)?)
        }
        .await;
        record_request("list_models", start, result.is_ok());

        let models: Vec<ModelDescriptor> = result?
            .data
            .into_iter()
            .map(into_model_descriptor)
            .collect();
        self.models_cache
            .insert(self.base_url.clone(), Arc::new(models.clone()))
            .await;
        Ok(models)
    }

    /// Find one model in the listing.
    pub async fn fetch_model(&self, id: &str) -> Result<ModelDescriptor> {
        self.list_models()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| VeniceError::ModelNotFound(id.to_string()))
    }
}

/// Map non-success statuses and empty bodies to errors.
///
/// Only a declared `content-length: 0` is caught here. A chunked body that
/// carries no bytes is reported by the decoder as [`VeniceError::EmptyBody`]
/// once the body ends.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        if response.content_length() == Some(0) {
            return Err(VeniceError::EmptyBody);
        }
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %body, "request rejected");

    match status.as_u16() {
        429 => Err(VeniceError::RateLimited { retry_after, body }),
        code => Err(VeniceError::RequestFailed { status: code, body }),
    }
}

fn record_request(operation: &'static str, start: Instant, ok: bool) {
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => if ok { "ok" } else { "error" },
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

// ============================================================================
// Request body
// ============================================================================

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<VeniceMessage>,
    pub stream: bool,
    pub stream_options: StreamOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venice_parameters: Option<VeniceParameters>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamOptions {
    pub include_usage: bool,
}

/// Venice-specific request switches.
///
/// Only switches the caller set explicitly are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VeniceParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_web_search: Option<WebSearchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_search_results_in_stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_venice_system_prompt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_thinking_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_thinking: Option<bool>,
}

impl VeniceParameters {
    /// Collect the switches set in `options`, or `None` when none apply.
    ///
    /// Search results are only requested while web search is not `off`, and
    /// thinking controls only for reasoning-capable models.
    pub fn from_options(options: &VeniceOptions, model: &ModelDescriptor) -> Option<Self> {
        let search_enabled = options.web_search != Some(WebSearchMode::Off);
        let params = Self {
            enable_web_search: options.web_search,
            include_search_results_in_stream: options
                .include_search_results_in_stream
                .filter(|_| search_enabled),
            include_venice_system_prompt: options.include_venice_system_prompt,
            strip_thinking_response: options
                .strip_thinking_response
                .filter(|_| model.supports_reasoning),
            disable_thinking: options.disable_thinking.filter(|_| model.supports_reasoning),
        };
        (params != Self::default()).then_some(params)
    }
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl ApiHandler for VeniceHandler {
    fn name(&self) -> &str {
        "venice"
    }

    async fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<ChunkStream> {
        VeniceHandler::create_message(self, system_prompt, messages).await
    }

    fn model(&self) -> ResolvedModel {
        VeniceHandler::model(self)
    }
}
