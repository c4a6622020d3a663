use std::{env, fmt, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_PATH: &str = "data/training_logs_12week.json";
pub const DEFAULT_OURA_API_BASE: &str = "https://api.ouraring.com/v2/usercollection";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub log_path: PathBuf,
    pub readiness_url: String,
    pub oura: ProxyConfig,
}

impl AppConfig {
    /// Reads `PORT`, `TRAINING_LOG_PATH`, `READINESS_URL`, `OURA_TOKEN` and
    /// `OURA_API_BASE`. Nothing here is fatal; a missing token only fails the
    /// readiness endpoint.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let log_path = env::var("TRAINING_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_PATH));

        let readiness_url = env::var("READINESS_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{port}/api/oura-readiness"));

        Self {
            port,
            log_path,
            readiness_url,
            oura: ProxyConfig::from_env(),
        }
    }
}

#[derive(Clone)]
pub struct ProxyConfig {
    pub token: Option<String>,
    pub api_base: String,
}

impl ProxyConfig {
    pub fn new(token: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            token: token.filter(|token| !token.trim().is_empty()),
            api_base: api_base.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            env::var("OURA_TOKEN").ok(),
            env::var("OURA_API_BASE").unwrap_or_else(|_| DEFAULT_OURA_API_BASE.to_string()),
        )
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .finish()
    }
}
