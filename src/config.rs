//! Application configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Sky Mavis Credentials ===
    /// API key sent as `X-API-Key` to the game gateway.
    pub skymavis_api_key: String,

    // === Upstream Endpoints ===
    /// Leaderboard endpoint.
    #[serde(default = "default_leaderboard_url")]
    pub leaderboard_url: String,

    /// Battle-history endpoint.
    #[serde(default = "default_battles_url")]
    pub battles_url: String,

    /// Community fighters endpoint (a user's own axies).
    #[serde(default = "default_fighters_url")]
    pub fighters_url: String,

    /// Marketplace GraphQL endpoint.
    #[serde(default = "default_marketplace_url")]
    pub marketplace_url: String,

    // === Valuation Parameters ===
    /// Number of recent battles sampled per player for team inference.
    #[serde(default = "default_battle_limit")]
    pub battle_limit: u32,

    /// Leaderboard page size (the API caps pages at 100).
    #[serde(default = "default_page_size")]
    pub leaderboard_page_size: u32,

    /// Number of listings returned in twin inspection mode.
    #[serde(default = "default_inspect_size")]
    pub twin_inspect_size: u32,

    /// Only report teams at or below this total price.
    #[serde(default)]
    pub max_team_price: Option<Decimal>,

    // === Request Client ===
    /// Maximum attempts per call before "retries exhausted".
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed wait between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Connection pool size per host.
    #[serde(default = "default_http_pool_size")]
    pub http_pool_size: usize,

    // === Observability ===
    /// Enable the Prometheus exporter during leaderboard sweeps.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Prometheus exporter port.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_leaderboard_url() -> String {
    "https://api-gateway.skymavis.com/origin/v2/leaderboards".to_string()
}

fn default_battles_url() -> String {
    "https://api-gateway.skymavis.com/x/origin/battle-history".to_string()
}

fn default_fighters_url() -> String {
    "https://api-gateway.skymavis.com/origin/v2/community/users/fighters".to_string()
}

fn default_marketplace_url() -> String {
    "https://graphql-gateway.axieinfinity.com/graphql/".to_string()
}

fn default_battle_limit() -> u32 {
    5
}

fn default_page_size() -> u32 {
    100
}

fn default_inspect_size() -> u32 {
    24
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    1500
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_http_pool_size() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.skymavis_api_key.is_empty() {
            return Err("SKYMAVIS_API_KEY is required".to_string());
        }

        if self.battle_limit == 0 {
            return Err("BATTLE_LIMIT must be at least 1".to_string());
        }

        if self.leaderboard_page_size == 0 || self.leaderboard_page_size > 100 {
            return Err("LEADERBOARD_PAGE_SIZE must be between 1 and 100".to_string());
        }

        if self.max_attempts == 0 {
            return Err("MAX_ATTEMPTS must be at least 1".to_string());
        }

        if self.twin_inspect_size == 0 {
            return Err("TWIN_INSPECT_SIZE must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config() -> Config {
        Config {
            skymavis_api_key: "test-key".to_string(),
            leaderboard_url: default_leaderboard_url(),
            battles_url: default_battles_url(),
            fighters_url: default_fighters_url(),
            marketplace_url: default_marketplace_url(),
            battle_limit: default_battle_limit(),
            leaderboard_page_size: default_page_size(),
            twin_inspect_size: default_inspect_size(),
            max_team_price: None,
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            http_timeout_ms: default_http_timeout_ms(),
            http_pool_size: default_http_pool_size(),
            metrics_enabled: true,
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_battle_limit(), 5);
        assert_eq!(default_page_size(), 100);
        assert_eq!(default_max_attempts(), 5);
        assert_eq!(default_retry_delay_ms(), 1500);
        assert!(default_true());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let config = Config {
            skymavis_api_key: "".to_string(),
            ..test_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_page() {
        let config = Config {
            leaderboard_page_size: 250,
            ..test_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }
}
