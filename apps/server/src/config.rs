use std::{net::SocketAddr, time::Duration};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: DEFAULT_DB_PATH.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Reads `SPENDWISE_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable values are logged
    /// and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let listen_addr = match lookup("SPENDWISE_LISTEN_ADDR") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid SPENDWISE_LISTEN_ADDR '{}', using {}",
                    raw,
                    DEFAULT_LISTEN_ADDR
                );
                defaults.listen_addr
            }),
            None => defaults.listen_addr,
        };

        let db_path = lookup("SPENDWISE_DB_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.db_path);

        let cors_allow: Vec<String> = lookup("SPENDWISE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let cors_allow = if cors_allow.is_empty() {
            defaults.cors_allow
        } else {
            cors_allow
        };

        let request_timeout = match lookup("SPENDWISE_REQUEST_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(
                        "Invalid SPENDWISE_REQUEST_TIMEOUT_MS '{}', using {}",
                        raw,
                        DEFAULT_TIMEOUT_MS
                    );
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout,
        }
    }
}
