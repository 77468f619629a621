//! Provider descriptor trait.
//!
//! A descriptor knows how to talk to one vendor's chat-completion API: how
//! to shape the request body, which headers to attach, and where the reply
//! text lives in the response. All three functions are pure; the network
//! call itself is driven by the conversation controller through
//! [`ChatTransport`](super::transport::ChatTransport), so adding a provider
//! never touches the controller.

use serde_json::{Value, json};

use super::types::{ChatResponse, Message};

/// Static description of one chat-completion provider.
pub trait ProviderDescriptor: Send + Sync {
    /// Stable identifier used for registry lookup (e.g. `"openai"`).
    fn id(&self) -> &'static str;

    /// Human-readable label.
    fn display_name(&self) -> &'static str;

    /// Fixed URL of the chat-completion endpoint.
    fn endpoint(&self) -> &'static str;

    /// Model identifier sent with every request.
    fn default_model(&self) -> &'static str;

    /// Build the vendor-specific request body from the full history.
    fn request_body(&self, history: &[Message], model: &str) -> Value;

    /// Build the request headers carrying the user's credential.
    ///
    /// Must include a content-type and an authorization header. Returned as
    /// plain pairs so the function stays infallible; an unusable credential
    /// surfaces later as a transport failure.
    fn headers(&self, credential: &str) -> Vec<(String, String)>;

    /// Pull the reply text out of a response body.
    ///
    /// Total function: a missing, empty, or malformed reply field yields the
    /// provider's fallback literal instead of an error.
    fn reply_text(&self, body: &Value) -> String;
}

/// Request body in the chat-completions shape shared by the built-in
/// providers: `{ "model": ..., "messages": [...] }`.
pub(crate) fn chat_completions_body(history: &[Message], model: &str) -> Value {
    json!({
        "model": model,
        "messages": history,
    })
}

/// Content-type plus bearer-token authorization headers.
pub(crate) fn bearer_headers(credential: &str) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), format!("Bearer {credential}")),
    ]
}

/// Reply text at `choices[0].message.content`, or `fallback` when the field
/// is absent or empty. An empty reply counts as missing, matching the
/// falsy-or semantics the providers' web clients exhibit.
pub(crate) fn first_choice_text(body: &Value, fallback: &'static str) -> String {
    serde_json::from_value::<ChatResponse>(body.clone())
        .ok()
        .and_then(|response| response.choices.into_iter().next())
        .map(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::Role;

    #[test]
    fn chat_completions_body_shape() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let body = chat_completions_body(&history, "gpt-3.5-turbo");

        assert_eq!(body["model"], "gpt-3.5-turbo");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "hi");
        assert_eq!(messages[1]["role"], "assistant");
    }

    #[test]
    fn bearer_headers_include_content_type_and_auth() {
        let headers = bearer_headers("sk-test");
        assert!(
            headers
                .iter()
                .any(|(k, v)| k == "Content-Type" && v == "application/json")
        );
        assert!(
            headers
                .iter()
                .any(|(k, v)| k == "Authorization" && v == "Bearer sk-test")
        );
    }

    #[test]
    fn first_choice_text_extracts_reply() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "pong"}}]
        });
        assert_eq!(first_choice_text(&body, "fallback"), "pong");
    }

    #[test]
    fn first_choice_text_falls_back_on_missing_field() {
        assert_eq!(
            first_choice_text(&serde_json::json!({}), "fallback"),
            "fallback"
        );
    }

    #[test]
    fn first_choice_text_falls_back_on_empty_reply() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        });
        assert_eq!(first_choice_text(&body, "fallback"), "fallback");
    }

    #[test]
    fn first_choice_text_falls_back_on_unexpected_shape() {
        let body = serde_json::json!({"choices": "nope"});
        assert_eq!(first_choice_text(&body, "fallback"), "fallback");
        let body = serde_json::json!({"error": {"message": "invalid key"}});
        assert_eq!(first_choice_text(&body, "fallback"), "fallback");
    }

    #[test]
    fn history_roles_serialize_into_body() {
        let history = vec![Message {
            role: Role::Assistant,
            content: "prior".to_string(),
        }];
        let body = chat_completions_body(&history, "m");
        assert_eq!(body["messages"][0]["role"], "assistant");
    }
}
