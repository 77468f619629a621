//! OpenAI chat-completion provider.

use serde_json::Value;

use super::provider::{ProviderDescriptor, bearer_headers, chat_completions_body, first_choice_text};
use super::types::Message;

/// OpenAI ChatGPT descriptor.
pub struct OpenAi;

impl OpenAi {
    /// Reply shown when the response carries no usable choice.
    pub const FALLBACK_REPLY: &'static str = "ERROR: No response";
}

impl ProviderDescriptor for OpenAi {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI ChatGPT"
    }

    fn endpoint(&self) -> &'static str {
        "https://api.openai.com/v1/chat/completions"
    }

    fn default_model(&self) -> &'static str {
        "gpt-3.5-turbo"
    }

    fn request_body(&self, history: &[Message], model: &str) -> Value {
        chat_completions_body(history, model)
    }

    fn headers(&self, credential: &str) -> Vec<(String, String)> {
        bearer_headers(credential)
    }

    fn reply_text(&self, body: &Value) -> String {
        first_choice_text(body, Self::FALLBACK_REPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_identity() {
        let p = OpenAi;
        assert_eq!(p.id(), "openai");
        assert_eq!(p.display_name(), "OpenAI ChatGPT");
        assert_eq!(p.endpoint(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(p.default_model(), "gpt-3.5-turbo");
    }

    #[test]
    fn reply_text_happy_path() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
        });
        assert_eq!(OpenAi.reply_text(&body), "hi there");
    }

    #[test]
    fn reply_text_fallback_on_empty_body() {
        assert_eq!(
            OpenAi.reply_text(&serde_json::json!({})),
            "ERROR: No response"
        );
    }

    #[test]
    fn headers_carry_credential() {
        let headers = OpenAi.headers("sk-abc");
        assert!(
            headers
                .iter()
                .any(|(k, v)| k == "Authorization" && v == "Bearer sk-abc")
        );
    }
}
