//! Conversions from our message types to Venice's chat format.
//!
//! Venice speaks the OpenAI chat-completions dialect: a flat list of
//! role-tagged messages where tool calls ride on assistant messages and tool
//! results are separate `tool` messages.

use serde::Serialize;

use crate::types::{ContentBlock, Message, Role};

/// A message in Venice's request schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeniceMessage {
    pub role: VeniceRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<VeniceContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<VeniceToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VeniceRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Plain string content, or an array of parts when images are attached
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VeniceContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeniceToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: &'static str,
    pub function: VeniceFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeniceFunctionCall {
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

impl VeniceMessage {
    fn new(role: VeniceRole, content: Option<VeniceContent>) -> Self {
        Self {
            role,
            content,
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(VeniceRole::System, Some(VeniceContent::Text(text.into())))
    }
}

/// Build the full request message list: the system prompt first, then the
/// converted conversation.
pub fn to_venice_messages(system_prompt: &str, messages: &[Message]) -> Vec<VeniceMessage> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(VeniceMessage::system(system_prompt));
    for msg in messages {
        match msg.role {
            Role::User => convert_user(&msg.content, &mut out),
            Role::Assistant => convert_assistant(&msg.content, &mut out),
        }
    }
    out
}

fn convert_user(blocks: &[ContentBlock], out: &mut Vec<VeniceMessage>) {
    let mut parts = Vec::new();
    let mut has_image = false;

    for block in blocks {
        match block {
            ContentBlock::Text { text } => parts.push(ContentPart::Text { text: text.clone() }),
            ContentBlock::Image { media_type, data } => {
                has_image = true;
                parts.push(ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{media_type};base64,{data}"),
                    },
                });
            }
            // tool results must directly follow the assistant's tool calls
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => {
                let mut tool = VeniceMessage::new(
                    VeniceRole::Tool,
                    Some(VeniceContent::Text(content.clone())),
                );
                tool.tool_call_id = Some(tool_use_id.clone());
                out.push(tool);
            }
            ContentBlock::ToolUse { .. } => {}
        }
    }

    if parts.is_empty() {
        return;
    }
    let content = if has_image {
        VeniceContent::Parts(parts)
    } else {
        VeniceContent::Text(join_text(&parts))
    };
    out.push(VeniceMessage::new(VeniceRole::User, Some(content)));
}

fn convert_assistant(blocks: &[ContentBlock], out: &mut Vec<VeniceMessage>) {
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text.as_str()),
            ContentBlock::ToolUse { id, name, input } => tool_calls.push(VeniceToolCall {
                id: id.clone(),
                call_type: "function",
                function: VeniceFunctionCall {
                    name: name.clone(),
                    arguments: input.to_string(),
                },
            }),
            // assistants cannot send images or tool results
            ContentBlock::Image { .. } | ContentBlock::ToolResult { .. } => {}
        }
    }

    if texts.is_empty() && tool_calls.is_empty() {
        return;
    }
    let content = (!texts.is_empty()).then(|| VeniceContent::Text(texts.join("\n")));
    let mut msg = VeniceMessage::new(VeniceRole::Assistant, content);
    if !tool_calls.is_empty() {
        msg.tool_calls = Some(tool_calls);
    }
    out.push(msg);
}

fn join_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text { text } => Some(text.as_str()),
            ContentPart::ImageUrl { .. } => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
