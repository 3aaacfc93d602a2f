/*
 * Responsibility
 * - Load settings from env (listen address, CORS, signing key, token TTL)
 * - Validate them (fail startup when required values are missing/broken)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::{env, fmt};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Development fallback for AUTH_SIGNING_KEY. Matches the secret the legacy
/// deployment hardcoded; production refuses to start without an explicit key.
const DEV_SIGNING_KEY_B64: &str =
    "792F413F4428472B4B6250655368566D597133743677397A244326452948404D";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub cors_allowed_origins: Vec<String>,

    /// Raw HMAC key bytes, base64-decoded from AUTH_SIGNING_KEY.
    pub signing_key: Vec<u8>,
    /// Token lifetime in seconds. The default of 24 mirrors the value the
    /// legacy service shipped with (a millisecond constant worth ~24s);
    /// deployments are expected to set this deliberately.
    pub token_ttl_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let signing_key_b64 = match env::var("AUTH_SIGNING_KEY") {
            Ok(v) => v,
            Err(_) if !app_env.is_production() => DEV_SIGNING_KEY_B64.to_string(),
            Err(_) => return Err(ConfigError::Missing("AUTH_SIGNING_KEY")),
        };
        let signing_key = BASE64
            .decode(signing_key_b64.trim())
            .map_err(|_| ConfigError::Invalid("AUTH_SIGNING_KEY"))?;
        // HS256 wants at least a 256-bit key.
        if signing_key.len() < 32 {
            return Err(ConfigError::Invalid("AUTH_SIGNING_KEY"));
        }

        let token_ttl_seconds = env::var("AUTH_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        Ok(Config {
            addr,
            app_env,
            cors_allowed_origins,
            signing_key,
            token_ttl_seconds,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}
