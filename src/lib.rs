//! Parley - a minimal multi-provider LLM chat client for the terminal.
//!
//! Two components, composed linearly: the provider registry ([`llm`])
//! normalizes divergent vendor request/response shapes behind one pure
//! descriptor interface, and the conversation controller
//! ([`conversation`]) drives the send lifecycle over the ordered message
//! history. Presentation ([`transcript`]) and configuration ([`config`])
//! sit outside that core. Nothing is persisted across sessions.

pub mod config;
pub mod conversation;
pub mod llm;
pub mod transcript;
