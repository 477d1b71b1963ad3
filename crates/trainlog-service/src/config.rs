//! Service-layer configuration, passed to constructors at start-up.

/// Upper bound on any workout page size.
pub const PAGE_SIZE_LIMIT: u64 = 100;

/// Paging and listing defaults.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Page size used when the caller's is missing or out of range.
    pub default_per_page: u64,
    pub max_per_page: u64,
    /// Row limit for body-weight listings when the caller passes 0.
    pub default_body_weight_limit: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            max_per_page: PAGE_SIZE_LIMIT,
            default_body_weight_limit: 90,
        }
    }
}

/// Connection settings for the OpenAI-compatible text-generation API.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// `None` disables generation; every call fails as unavailable.
    pub api_key: Option<String>,
    /// API root, without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
        }
    }
}
