//! Tests for message conversion to the Venice chat format.

use serde_json::json;

use venice::convert::{VeniceContent, VeniceRole, to_venice_messages};
use venice::{ContentBlock, Message, Role};

#[test]
fn system_prompt_comes_first() {
    let out = to_venice_messages("You are terse.", &[Message::user("hi")]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].role, VeniceRole::System);
    assert_eq!(
        out[0].content,
        Some(VeniceContent::Text("You are terse.".into()))
    );
    assert_eq!(out[1].role, VeniceRole::User);
}

#[test]
fn empty_conversation_is_just_the_system_prompt() {
    let out = to_venice_messages("sys", &[]);
    assert_eq!(out.len(), 1);
}

#[test]
fn text_only_user_message_is_a_plain_string() {
    let msg = Message::user("first").push(ContentBlock::text("second"));
    let out = to_venice_messages("sys", &[msg]);
    assert_eq!(
        serde_json::to_value(&out[1]).unwrap(),
        json!({ "role": "user", "content": "first\nsecond" })
    );
}

#[test]
fn images_become_data_url_parts() {
    let msg = Message::user("what is this?").push(ContentBlock::image("image/png", "iVBORw0KGgo="));
    let out = to_venice_messages("sys", &[msg]);
    assert_eq!(
        serde_json::to_value(&out[1]).unwrap(),
        json!({
            "role": "user",
            "content": [
                { "type": "text", "text": "what is this?" },
                { "type": "image_url", "image_url": { "url": "data:image/png;base64,iVBORw0KGgo=" } },
            ]
        })
    );
}

#[test]
fn assistant_tool_use_becomes_tool_calls() {
    let msg = Message::assistant("Let me check.").push(ContentBlock::ToolUse {
        id: "call_9".into(),
        name: "search".into(),
        input: json!({ "q": "rust" }),
    });
    let out = to_venice_messages("sys", &[msg]);
    assert_eq!(
        serde_json::to_value(&out[1]).unwrap(),
        json!({
            "role": "assistant",
            "content": "Let me check.",
            "tool_calls": [{
                "id": "call_9",
                "type": "function",
                "function": { "name": "search", "arguments": "{\"q\":\"rust\"}" }
            }]
        })
    );
}

#[test]
fn assistant_with_only_tool_calls_has_no_content() {
    let msg = Message::with_blocks(
        Role::Assistant,
        vec![ContentBlock::ToolUse {
            id: "call_1".into(),
            name: "noop".into(),
            input: json!({}),
        }],
    );
    let out = to_venice_messages("sys", &[msg]);
    let value = serde_json::to_value(&out[1]).unwrap();
    assert!(value.get("content").is_none());
    assert_eq!(value["tool_calls"][0]["function"]["arguments"], "{}");
}

#[test]
fn tool_results_precede_user_text() {
    let msg = Message::with_blocks(
        Role::User,
        vec![
            ContentBlock::text("thanks"),
            ContentBlock::ToolResult {
                tool_use_id: "call_1".into(),
                content: "42".into(),
                is_error: false,
            },
        ],
    );
    let out = to_venice_messages("sys", &[msg]);
    assert_eq!(out.len(), 3);
    assert_eq!(out[1].role, VeniceRole::Tool);
    assert_eq!(out[1].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(out[1].content, Some(VeniceContent::Text("42".into())));
    assert_eq!(out[2].role, VeniceRole::User);
}

#[test]
fn empty_messages_are_dropped() {
    let out = to_venice_messages(
        "sys",
        &[
            Message::with_blocks(Role::Assistant, vec![]),
            Message::with_blocks(Role::User, vec![]),
            Message::user("still here"),
        ],
    );
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].content, Some(VeniceContent::Text("still here".into())));
}

#[test]
fn order_is_preserved() {
    let conversation = vec![
        Message::user("one"),
        Message::assistant("two"),
        Message::user("three"),
    ];
    let roles: Vec<_> = to_venice_messages("sys", &conversation)
        .into_iter()
        .map(|m| m.role)
        .collect();
    assert_eq!(
        roles,
        vec![
            VeniceRole::System,
            VeniceRole::User,
            VeniceRole::Assistant,
            VeniceRole::User
        ]
    );
}
