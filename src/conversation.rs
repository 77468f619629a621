//! Conversation controller.
//!
//! Owns the ordered message history and drives the send lifecycle as a
//! two-state machine over `pending`: `Idle` → `Sending` → `Idle` on success or
//! failure alike. At most one request is in flight; while `Sending`, further
//! sends are rejected. There are no retries and no queueing.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::llm::{
    ChatTransport, Message, ProviderDescriptor, ProviderRegistry, TransportError,
};

/// Fixed assistant turn appended when the network call fails for any reason.
///
/// Every transport failure collapses into this one literal; the underlying
/// kind is still reported through [`SendOutcome::Failed`].
pub const REQUEST_FAILED_REPLY: &str = "Request failed. Please check your API settings.";

/// Why a send was rejected without any state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Input was empty after trimming whitespace.
    EmptyInput,
    /// No credential has been set.
    MissingCredential,
    /// A request is already in flight.
    RequestInFlight,
}

/// Result of one send cycle.
#[derive(Debug)]
pub enum SendOutcome {
    /// The provider replied; an assistant turn was appended.
    Replied,
    /// The call failed; the fixed failure turn was appended.
    Failed(TransportError),
    /// A precondition guard fired; nothing changed.
    Rejected(RejectReason),
}

/// A request built by the synchronous prefix of `send`, ready to dispatch.
struct PreparedSend {
    endpoint: String,
    headers: Vec<(String, String)>,
    body: Value,
}

/// One in-memory chat session: active provider, credential, history, and
/// the single pending-request gate. Nothing is persisted.
pub struct Conversation<T> {
    registry: ProviderRegistry,
    active: Arc<dyn ProviderDescriptor>,
    credential: String,
    history: Vec<Message>,
    pending: bool,
    transport: T,
    request_timeout: Duration,
}

impl<T: ChatTransport> Conversation<T> {
    /// Create a session on the registry's first provider with an empty
    /// history and no credential.
    pub fn new(registry: ProviderRegistry, transport: T, request_timeout: Duration) -> Self {
        let active = Arc::clone(&registry.descriptors()[0]);
        Self {
            registry,
            active,
            credential: String::new(),
            history: Vec::new(),
            pending: false,
            transport,
            request_timeout,
        }
    }

    /// The ordered, append-only conversation history.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Whether a request is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The currently selected provider.
    pub fn active_provider(&self) -> &dyn ProviderDescriptor {
        self.active.as_ref()
    }

    /// The registry backing provider selection.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Store the credential. No validation happens here; a bad credential
    /// surfaces as a request failure on the next send.
    pub fn set_credential(&mut self, value: impl Into<String>) {
        self.credential = value.into();
    }

    /// Switch the active provider via the registry (unknown ids fall back to
    /// the first registered provider). History and credential are untouched;
    /// the next send carries the full prior history to the new provider.
    pub fn switch_provider(&mut self, id: &str) {
        self.active = self.registry.select(id);
        debug!(provider = self.active.id(), "switched provider");
    }

    /// Run one send-receive cycle.
    ///
    /// The user turn is appended synchronously before any network activity,
    /// so it is visible even when the call later fails. The call is bounded
    /// by the configured timeout and by `cancel`; on every completion path
    /// the pending gate is cleared.
    pub async fn send(&mut self, input: &str, cancel: &CancellationToken) -> SendOutcome {
        let prepared = match self.begin(input) {
            Ok(prepared) => prepared,
            Err(reason) => return SendOutcome::Rejected(reason),
        };
        let result = self.dispatch(&prepared, cancel).await;
        self.finish(result)
    }

    /// Synchronous prefix: guards, append the user turn, raise the pending
    /// gate, and build the request from the post-append history.
    fn begin(&mut self, input: &str) -> Result<PreparedSend, RejectReason> {
        let text = input.trim();
        if text.is_empty() {
            return Err(RejectReason::EmptyInput);
        }
        if self.credential.is_empty() {
            return Err(RejectReason::MissingCredential);
        }
        if self.pending {
            return Err(RejectReason::RequestInFlight);
        }

        self.history.push(Message::user(text));
        self.pending = true;

        let body = self
            .active
            .request_body(&self.history, self.active.default_model());
        let headers = self.active.headers(&self.credential);

        debug!(
            provider = self.active.id(),
            turns = self.history.len(),
            "dispatching chat request"
        );

        Ok(PreparedSend {
            endpoint: self.active.endpoint().to_string(),
            headers,
            body,
        })
    }

    /// The single suspension point: one POST, raced against the timeout and
    /// the cancellation token.
    async fn dispatch(
        &self,
        prepared: &PreparedSend,
        cancel: &CancellationToken,
    ) -> Result<Value, TransportError> {
        let call = self
            .transport
            .post(&prepared.endpoint, &prepared.headers, &prepared.body);

        tokio::select! {
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            result = tokio::time::timeout(self.request_timeout, call) => match result {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout(self.request_timeout)),
            },
        }
    }

    /// Append the assistant turn (reply or the fixed failure literal) and
    /// clear the pending gate on both paths.
    fn finish(&mut self, result: Result<Value, TransportError>) -> SendOutcome {
        self.pending = false;
        match result {
            Ok(body) => {
                let reply = self.active.reply_text(&body);
                self.history.push(Message::assistant(reply));
                SendOutcome::Replied
            }
            Err(err) => {
                warn!(provider = self.active.id(), error = %err, "chat request failed");
                self.history.push(Message::assistant(REQUEST_FAILED_REPLY));
                SendOutcome::Failed(err)
            }
        }
    }
}
