use svgsmith_core::generation::{DEFAULT_TOP_K, DEFAULT_TOP_P};

/// Default model used for generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default REST base URL (without trailing slash).
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default whole-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration for the Generative Language API.
///
/// The credential is carried explicitly here and handed to the client at
/// construction time.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_url: String,
    pub top_p: f32,
    pub top_k: u32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Configuration with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point the client at a different base URL (used by tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                                             |
    /// |-----------------------|-----------------------------------------------------|
    /// | `GEMINI_API_KEY`      | required                                            |
    /// | `GEMINI_MODEL`        | `gemini-2.5-flash`                                  |
    /// | `GEMINI_API_URL`      | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `GEMINI_TOP_P`        | `0.95`                                              |
    /// | `GEMINI_TOP_K`        | `40`                                                |
    /// | `GEMINI_TIMEOUT_SECS` | `120`                                               |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let api_url = std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let top_p: f32 = std::env::var("GEMINI_TOP_P")
            .map(|v| v.parse().expect("GEMINI_TOP_P must be a valid f32"))
            .unwrap_or(DEFAULT_TOP_P);

        let top_k: u32 = std::env::var("GEMINI_TOP_K")
            .map(|v| v.parse().expect("GEMINI_TOP_K must be a valid u32"))
            .unwrap_or(DEFAULT_TOP_K);

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .map(|v| v.parse().expect("GEMINI_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            model,
            top_p,
            top_k,
            timeout_secs,
            ..Self::new(String::new())
        }
        .with_api_url(api_url)
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
