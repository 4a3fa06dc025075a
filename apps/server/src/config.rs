use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use fintrack_ai::GeminiConfig;

use crate::auth::decode_secret_key;

/// How the server resolves the owner of a request.
#[derive(Clone, Debug)]
pub enum AuthConfig {
    /// Bearer tokens signed with this HS256 secret.
    Jwt { secret: Vec<u8> },
    /// Every request belongs to this owner. Development only.
    DevOwner(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub auth: AuthConfig,
    pub ai: GeminiConfig,
    pub log_format: LogFormat,
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_var("FT_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:4000".to_string())
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let db_path = env_var("FT_DB_PATH").unwrap_or_else(|| "./db/fintrack.db".into());
        let cors_allow = env_var("FT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_var("FT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .unwrap_or(30000);

        let auth = match (env_var("FT_JWT_SECRET"), env_var("FT_DEV_OWNER_ID")) {
            (Some(secret), _) => AuthConfig::Jwt {
                secret: decode_secret_key(&secret).context("Invalid FT_JWT_SECRET")?,
            },
            (None, Some(owner)) => AuthConfig::DevOwner(owner),
            (None, None) => anyhow::bail!(
                "No authentication configured: set FT_JWT_SECRET, or FT_DEV_OWNER_ID for local development"
            ),
        };

        let defaults = GeminiConfig::default();
        let ai = GeminiConfig {
            api_key: env_var("GEMINI_API_KEY"),
            model: env_var("FT_AI_MODEL").unwrap_or(defaults.model),
            base_url: env_var("FT_AI_BASE_URL").unwrap_or(defaults.base_url),
        };

        let log_format = match env_var("FT_LOG_FORMAT").as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            auth,
            ai,
            log_format,
        })
    }
}
