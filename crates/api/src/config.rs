//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use shopfront_inventory::SurgeSettings;

pub const SURGE_WINDOW_MS: &str = "SHOP_SURGE_WINDOW_MS";
pub const SURGE_THRESHOLD: &str = "SHOP_SURGE_THRESHOLD";
pub const INVENTORY_PATH: &str = "SHOP_INVENTORY_PATH";
pub const BIND_ADDR: &str = "SHOP_BIND_ADDR";
pub const API_TOKEN: &str = "SHOP_API_TOKEN";
pub const LOG_FORMAT: &str = "SHOP_LOG_FORMAT";

/// Log output style, chosen before anything else is configured.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(LOG_FORMAT).ok().as_deref())
    }

    /// `pretty` (any case) selects human-readable logs; anything else is JSON.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => Self::Pretty,
            _ => Self::Json,
        }
    }

    pub fn init(self) {
        match self {
            Self::Json => shopfront_observability::init(),
            Self::Pretty => shopfront_observability::init_pretty(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
}

/// Startup configuration. Fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub surge: SurgeSettings,
    pub inventory_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Bearer token for mutating routes. `None` means "not configured".
    pub api_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = SurgeSettings::default();

        let window_ms = match lookup(SURGE_WINDOW_MS) {
            Some(raw) => parse::<i64>(SURGE_WINDOW_MS, "duration in milliseconds", &raw)?,
            None => defaults.window.num_milliseconds(),
        };
        if window_ms <= 0 {
            return Err(ConfigError::NonPositive(SURGE_WINDOW_MS));
        }

        let threshold = match lookup(SURGE_THRESHOLD) {
            Some(raw) => parse::<usize>(SURGE_THRESHOLD, "non-negative count", &raw)?,
            None => defaults.threshold,
        };

        let inventory_path = lookup(INVENTORY_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/inventory.json"));

        let bind_addr = match lookup(BIND_ADDR) {
            Some(raw) => parse::<SocketAddr>(BIND_ADDR, "socket address", &raw)?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let api_token = lookup(API_TOKEN).filter(|t| !t.trim().is_empty());

        Ok(Self {
            surge: SurgeSettings {
                window: Duration::milliseconds(window_ms),
                threshold,
            },
            inventory_path,
            bind_addr,
            api_token,
        })
    }
}

fn parse<T: core::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: raw.to_string(),
    })
}
