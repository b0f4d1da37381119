use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BOOKED_CACHE_IDLE_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub bind_addr: String,
    pub port: u16,
    pub booked_cache_idle: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing or unparseable values fall
    /// back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup("API_BASE_URL") {
            Some(raw) => Url::parse(&raw).unwrap_or_else(|e| {
                warn!("API_BASE_URL {:?} is invalid ({}), using default", raw, e);
                default_api_base_url()
            }),
            None => {
                warn!("API_BASE_URL not set, using {}", DEFAULT_API_BASE_URL);
                default_api_base_url()
            }
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let idle_secs = parse_or(&lookup, "BOOKED_CACHE_IDLE_SECS", DEFAULT_BOOKED_CACHE_IDLE_SECS);

        Self {
            api_base_url,
            bind_addr,
            port,
            booked_cache_idle: Duration::from_secs(idle_secs),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_api_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL is valid")
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} {:?} is not valid, using default", key, raw);
            default
        }),
        None => default,
    }
}
