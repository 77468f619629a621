//! Provider registry: the closed, ordered set of supported providers.

use std::sync::Arc;

use tracing::debug;

use super::deepseek::DeepSeek;
use super::openai::OpenAi;
use super::provider::ProviderDescriptor;

/// Registry of provider descriptors in a fixed display order.
///
/// The set is non-empty by construction and never mutated after startup.
#[derive(Clone)]
pub struct ProviderRegistry {
    descriptors: Vec<Arc<dyn ProviderDescriptor>>,
}

impl ProviderRegistry {
    /// Build a registry from an ordered, non-empty descriptor list.
    ///
    /// The first entry doubles as the fallback for unknown lookups, so an
    /// empty list is a construction bug.
    pub fn new(descriptors: Vec<Arc<dyn ProviderDescriptor>>) -> Self {
        assert!(
            !descriptors.is_empty(),
            "provider registry requires at least one descriptor"
        );
        Self { descriptors }
    }

    /// The built-in provider set, in display order.
    pub fn builtin() -> Self {
        Self::new(vec![Arc::new(OpenAi), Arc::new(DeepSeek)])
    }

    /// All registered descriptors in registration order.
    pub fn descriptors(&self) -> &[Arc<dyn ProviderDescriptor>] {
        &self.descriptors
    }

    /// Look up a descriptor by id, falling back to the first registered
    /// provider when the id is unknown. Mirrors the default-select-first
    /// behavior of a selection dropdown; never fails.
    pub fn select(&self, id: &str) -> Arc<dyn ProviderDescriptor> {
        match self.descriptors.iter().find(|d| d.id() == id) {
            Some(descriptor) => Arc::clone(descriptor),
            None => {
                debug!(requested = id, "unknown provider id, using first registered");
                Arc::clone(&self.descriptors[0])
            }
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
