//! Image Generator Port - Interface for the image provider.

use async_trait::async_trait;

use crate::domain::{ImageRequest, ModelDescriptor, NormalizedResult};

/// Port for image generation.
///
/// A successful result carries an image reference (URL) in place of text.
/// At least one model must work with zero configuration, so
/// [`is_configured`](Self::is_configured) is expected to report `true`
/// regardless of credential state.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Whether the adapter can serve requests at all.
    fn is_configured(&self) -> bool;

    /// Static model list.
    fn available_models(&self) -> Vec<ModelDescriptor>;

    /// Replaces the credential for paid models. Empty input is ignored.
    fn reconfigure(&self, credential: &str);

    /// Generates an image for `request`.
    async fn generate_image(&self, request: &ImageRequest) -> NormalizedResult;
}
