//! DeepSeek chat-completion provider.
//!
//! DeepSeek speaks the same chat-completions wire shape as OpenAI; only the
//! endpoint, model, and (localized) fallback reply differ.

use serde_json::Value;

use super::provider::{ProviderDescriptor, bearer_headers, chat_completions_body, first_choice_text};
use super::types::Message;

/// DeepSeek descriptor.
pub struct DeepSeek;

impl DeepSeek {
    /// Localized "no response" reply, kept as the vendor's web client shows it.
    pub const FALLBACK_REPLY: &'static str = "无响应";
}

impl ProviderDescriptor for DeepSeek {
    fn id(&self) -> &'static str {
        "deepseek"
    }

    fn display_name(&self) -> &'static str {
        "DeepSeek"
    }

    fn endpoint(&self) -> &'static str {
        "https://api.deepseek.com/v1/chat/completions"
    }

    fn default_model(&self) -> &'static str {
        "deepseek-chat"
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
