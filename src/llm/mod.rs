//! Provider registry and chat-completion plumbing.

mod deepseek;
mod error;
mod openai;
mod provider;
mod registry;
mod transport;
mod types;

pub use deepseek::DeepSeek;
pub use error::TransportError;
pub use openai::OpenAi;
pub use provider::ProviderDescriptor;
pub use registry::ProviderRegistry;
pub use transport::{ChatTransport, HttpTransport};
pub use types::{ChatResponse, Choice, Message, Role};
