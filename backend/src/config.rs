use anyhow::anyhow;
use std::{env, net::SocketAddr};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

const IDENTITY_URL_KEYS: &[&str] = &[
    "IDENTITY_SERVICE_URL",
    "NEXT_PUBLIC_SUPABASE_URL",
    "SUPABASE_URL",
];
const IDENTITY_KEY_KEYS: &[&str] = &["IDENTITY_SERVICE_KEY", "SUPABASE_SERVICE_ROLE_KEY"];
const ALLOWED_ORIGIN_KEYS: &[&str] = &["ALLOWED_ORIGINS", "ALLOWED_ORIGIN"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the identity service, without a trailing slash.
    pub identity_service_url: Option<String>,
    /// Administrative credential sent as `apikey` and bearer token.
    pub identity_service_key: Option<String>,
    /// Origin prefixes a caller's `Origin` or `Referer` must start with.
    /// Empty disables the check.
    pub allowed_origins: Vec<String>,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so it can be
    /// exercised without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let identity_service_url = first_present(&lookup, IDENTITY_URL_KEYS)
            .map(|url| url.trim_end_matches('/').to_string());
        let identity_service_key = first_present(&lookup, IDENTITY_KEY_KEYS);

        let allowed_origins = first_present(&lookup, ALLOWED_ORIGIN_KEYS)
            .map(|raw| parse_origin_list(&raw))
            .unwrap_or_default();

        let bind_addr_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid BIND_ADDR value: {}", bind_addr_raw))?;

        Ok(Config {
            identity_service_url,
            identity_service_key,
            allowed_origins,
            bind_addr,
        })
    }

    pub fn identity_configured(&self) -> bool {
        self.identity_service_url.is_some() && self.identity_service_key.is_some()
    }
}

fn first_present(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
