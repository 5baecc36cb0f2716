//! Provider registry: provider id to adapter lookup, catalog and runtime
//! reconfiguration.
//!
//! Lookups hand out a cloned `Arc`, so a call in flight keeps the adapter it
//! resolved even if [`ProviderRegistry::register`] swaps it out meanwhile.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::adapters::ai::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, GroqConfig, GroqProvider,
    HuggingFaceConfig, HuggingFaceProvider, ImageConfig, ImageProvider, OpenAIConfig,
    OpenAIProvider,
};
use crate::config::ProvidersConfig;
use crate::domain::{ProviderDescriptor, ProviderId, RelayError, Tier};
use crate::ports::{ImageGenerator, ProviderAdapter};

/// Catalog id of the image entry.
pub const IMAGE_CATALOG_ID: &str = "image";

/// Registered text providers plus the single image adapter.
pub struct ProviderRegistry {
    providers: RwLock<HashMap<ProviderId, Arc<dyn ProviderAdapter>>>,
    image: Arc<dyn ImageGenerator>,
}

impl ProviderRegistry {
    /// Creates a registry with no text providers.
    pub fn new(image: Arc<dyn ImageGenerator>) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            image,
        }
    }

    /// Builds the production registry: all five text providers and the image
    /// adapter, keyed from `config`.
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let key = |k: &Option<String>| k.clone().unwrap_or_default();

        let registry = Self::new(Arc::new(ImageProvider::new(
            ImageConfig::new(key(&config.openai_api_key)).with_timeout(config.timeout()),
        )));

        registry.register(Arc::new(GroqProvider::new(
            GroqConfig::new(key(&config.groq_api_key)).with_timeout(config.timeout()),
        )));
        registry.register(Arc::new(GeminiProvider::new(
            GeminiConfig::new(key(&config.gemini_api_key)).with_timeout(config.timeout()),
        )));
        registry.register(Arc::new(HuggingFaceProvider::new(
            HuggingFaceConfig::new(key(&config.huggingface_api_key))
                .with_timeout(config.slow_timeout()),
        )));
        registry.register(Arc::new(OpenAIProvider::new(
            OpenAIConfig::new(key(&config.openai_api_key)).with_timeout(config.timeout()),
        )));
        registry.register(Arc::new(AnthropicProvider::new(
            AnthropicConfig::new(key(&config.anthropic_api_key)).with_timeout(config.timeout()),
        )));

        registry
    }

    /// Adds an adapter under its own id, replacing any previous one.
    pub fn register(&self, adapter: Arc<dyn ProviderAdapter>) {
        let id = adapter.id();
        let mut providers = match self.providers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if providers.insert(id, adapter).is_some() {
            tracing::debug!(provider = %id, "provider adapter replaced");
        }
    }

    /// Looks up the adapter for a wire provider id.
    pub fn resolve(&self, provider: &str) -> Result<Arc<dyn ProviderAdapter>, RelayError> {
        let id: ProviderId = provider.parse()?;
        self.read()
            .get(&id)
            .cloned()
            .ok_or_else(|| RelayError::UnknownProvider(provider.to_string()))
    }

    /// The image adapter.
    pub fn image(&self) -> Arc<dyn ImageGenerator> {
        Arc::clone(&self.image)
    }

    /// Catalog in display order, computed from live adapter state.
    ///
    /// Free providers first, the image entry after them, paid providers last.
    pub fn list_providers(&self) -> Vec<ProviderDescriptor> {
        let providers = self.read();
        let mut catalog = Vec::with_capacity(providers.len() + 1);

        let registered = ProviderId::ALL
            .iter()
            .filter_map(|id| providers.get(id))
            .map(|adapter| adapter.descriptor());

        let (free, paid): (Vec<_>, Vec<_>) =
            registered.partition(|descriptor| descriptor.tier == Tier::Free);

        catalog.extend(free);
        catalog.push(ProviderDescriptor {
            id: IMAGE_CATALOG_ID.to_string(),
            display_name: "Image Generation".to_string(),
            tier: Tier::Free,
            configured: self.image.is_configured(),
            models: self.image.available_models(),
        });
        catalog.extend(paid);

        catalog
    }

    /// Replaces a provider's credential. Blank credentials are ignored.
    ///
    /// An OpenAI key also goes to the image adapter, which uses it for DALL-E.
    pub fn reconfigure(&self, provider: ProviderId, credential: &str) {
        if credential.trim().is_empty() {
            return;
        }

        if let Some(adapter) = self.read().get(&provider) {
            adapter.reconfigure(credential);
        }
        if provider == ProviderId::OpenAI {
            self.image.reconfigure(credential);
        }

        tracing::info!(provider = %provider, "provider credential updated");
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ProviderId, Arc<dyn ProviderAdapter>>> {
        match self.providers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;

    fn production_registry() -> ProviderRegistry {
        ProviderRegistry::from_config(&ProvidersConfig::default())
    }

    #[test]
    fn catalog_is_ordered_free_then_image_then_paid() {
        let ids: Vec<_> = production_registry()
            .list_providers()
            .into_iter()
            .map(|d| d.id)
            .collect();

        assert_eq!(
            ids,
            vec!["groq", "gemini", "huggingface", "image", "openai", "anthropic"]
        );
    }

    #[test]
    fn image_entry_is_always_configured() {
        let catalog = production_registry().list_providers();
        let image = catalog.iter().find(|d| d.id == "image").unwrap();
        assert!(image.configured);
        assert_eq!(image.display_name, "Image Generation");

        assert!(catalog
            .iter()
            .filter(|d| d.id != "image")
            .all(|d| !d.configured));
    }

    #[test]
    fn unknown_provider_is_a_routing_error() {
        let err = production_registry().resolve("mistral").err().unwrap();
        assert_eq!(err.to_string(), "Unknown provider: mistral");
    }

    #[test]
    fn unregistered_provider_is_unknown() {
        let registry = ProviderRegistry::new(Arc::new(ImageProvider::new(ImageConfig::default())));
        assert!(registry.resolve("groq").is_err());
    }

    #[test]
    fn reconfigure_updates_catalog_and_ignores_blank() {
        let registry = production_registry();

        registry.reconfigure(ProviderId::Groq, "   ");
        assert!(!registry.resolve("groq").unwrap().is_configured());

        registry.reconfigure(ProviderId::Groq, "gsk_new");
        assert!(registry.resolve("groq").unwrap().is_configured());

        let groq = &registry.list_providers()[0];
        assert!(groq.configured);
    }

    #[test]
    fn register_replaces_but_resolved_handles_survive() {
        let registry = production_registry();
        let before = registry.resolve("groq").unwrap();

        registry.register(Arc::new(MockProvider::new(ProviderId::Groq)));

        assert!(!before.is_configured());
        assert!(registry.resolve("groq").unwrap().is_configured());
    }
}
