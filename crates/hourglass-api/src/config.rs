// Application configuration loaded from environment variables.
// Decision: Downstream collaborators are optional — an unset backend or LLM key
// means the server runs entirely on mock data instead of refusing to start.

/// Deployment environment.
///
/// Controls the default log verbosity (debug in development, info otherwise)
/// and whether session cookies carry the Secure attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Default tracing filter when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "hourglass_api=debug,tower_http=debug",
            Environment::Production => "hourglass_api=info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Hosted data/auth backend reachable with a client-id/secret pair.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Hosted language-model completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub bind_addr: String,
    /// Hosted data backend; None means mock data only.
    pub backend: Option<BackendConfig>,
    /// LLM completion endpoint; None means canned assistant answers only.
    pub llm: Option<LlmConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            bind_addr: "0.0.0.0:9000".to_string(),
            backend: None,
            llm: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let environment = std::env::var("APP_ENV")
            .map(|s| Environment::from_str(&s))
            .unwrap_or_default();

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".to_string());

        // Data backend is configured only when the full credential pair is set
        let backend = match (
            std::env::var("DATA_BACKEND_URL"),
            std::env::var("DATA_BACKEND_CLIENT_ID"),
            std::env::var("DATA_BACKEND_CLIENT_SECRET"),
        ) {
            (Ok(base_url), Ok(client_id), Ok(client_secret))
                if !base_url.is_empty() && !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Some(BackendConfig {
                    base_url,
                    client_id,
                    client_secret,
                })
            }
            _ => None,
        };

        let llm = match std::env::var("LLM_API_KEY") {
            Ok(api_key) if !api_key.is_empty() => Some(LlmConfig {
                base_url: std::env::var("LLM_API_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
                api_key,
                model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            }),
            _ => None,
        };

        Self {
            environment,
            bind_addr,
            backend,
            llm,
        }
    }
}
