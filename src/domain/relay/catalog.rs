//! Provider and model catalog types used for client discovery.

use serde::Serialize;

/// Pricing tier of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Usable with a free account, or with no account at all.
    Free,
    /// Requires paid credentials.
    Paid,
}

/// A model offered by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Model identifier sent to the provider.
    pub id: &'static str,
    /// Label shown to users.
    #[serde(rename = "name")]
    pub display_name: &'static str,
}

impl ModelDescriptor {
    pub const fn new(id: &'static str, display_name: &'static str) -> Self {
        Self { id, display_name }
    }
}

/// A provider entry as reported to clients. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub tier: Tier,
    pub configured: bool,
    pub models: Vec<ModelDescriptor>,
}
