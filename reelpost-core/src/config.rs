//! Centralized configuration for Reelpost.
//!
//! All tunable parameters, endpoints and credentials are defined here so that
//! nothing secret is embedded as a literal in shipped code.

use std::net::SocketAddr;
use std::time::Duration;

use crate::ReelpostError;

/// Default plot budget in characters before a "Read more" link is appended.
pub const PLOT_CHAR_BUDGET: usize = 200;

/// Central configuration for all Reelpost components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct ReelpostConfig {
    pub server: ServerConfig,
    pub tmdb: TmdbConfig,
    pub omdb: OmdbConfig,
    pub telegram: TelegramConfig,
    pub network: NetworkConfig,
    pub compose: ComposeConfig,
    pub delivery: DeliveryConfig,
}

/// Inbound HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the API server binds to
    pub bind_addr: SocketAddr,
    /// Bearer token clients must present on `POST /` and `GET /search`
    pub auth_token: String,
    /// Shared secret Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`
    pub webhook_secret: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            auth_token: String::new(),
            webhook_secret: None,
        }
    }
}

/// Metadata provider (TMDB) endpoints and credentials.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    /// REST API base, without trailing slash
    pub api_base_url: String,
    /// Image CDN base, sizes are appended as path segments
    pub image_base_url: String,
    /// Public website used for info and "Read more" links
    pub site_url: String,
    /// Language passed to detail lookups
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            site_url: "https://www.themoviedb.org".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// Secondary poster provider. Only consulted when a key is present.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: Option<String>,
    pub image_base_url: String,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            image_base_url: "https://img.omdbapi.com".to_string(),
        }
    }
}

/// Messaging platform (Telegram Bot API) configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub api_base_url: String,
    /// Channel used when a request does not name one
    pub default_channel: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: "https://api.telegram.org".to_string(),
            default_channel: None,
        }
    }
}

/// Outbound HTTP behaviour shared by every client.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Upper bound for any single outbound request
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            user_agent: "reelpost/0.1.0",
        }
    }
}

/// Message formatting knobs.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Characters of overview kept before truncation
    pub plot_budget: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            plot_budget: PLOT_CHAR_BUDGET,
        }
    }
}

/// Delivery chain ordering.
#[derive(Debug, Clone, Default)]
pub struct DeliveryConfig {
    /// Run the admin check before any photo attempt
    pub verify_admin_first: bool,
}

impl ReelpostConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("REELPOST_BIND_ADDR") {
            if let Ok(addr) = addr.parse::<SocketAddr>() {
                config.server.bind_addr = addr;
            }
        }

        if let Ok(token) = std::env::var("AUTH_TOKEN") {
            config.server.auth_token = token;
        }

        config.server.webhook_secret = non_empty_var("TELEGRAM_WEBHOOK_SECRET");

        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            config.tmdb.api_key = key;
        }

        if let Ok(url) = std::env::var("REELPOST_TMDB_API_URL") {
            config.tmdb.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(url) = std::env::var("REELPOST_TMDB_IMAGE_URL") {
            config.tmdb.image_base_url = url.trim_end_matches('/').to_string();
        }

        config.omdb.api_key = non_empty_var("OMDB_API_KEY");

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            config.telegram.bot_token = token;
        }

        if let Ok(url) = std::env::var("REELPOST_TELEGRAM_API_URL") {
            config.telegram.api_base_url = url.trim_end_matches('/').to_string();
        }

        config.telegram.default_channel = non_empty_var("TELEGRAM_CHANNEL_ID");

        if let Ok(timeout) = std::env::var("REELPOST_REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.network.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(budget) = std::env::var("REELPOST_PLOT_BUDGET") {
            if let Ok(chars) = budget.parse::<usize>() {
                if chars > 0 {
                    config.compose.plot_budget = chars;
                }
            }
        }

        if let Ok(first) = std::env::var("REELPOST_VERIFY_ADMIN_FIRST") {
            config.delivery.verify_admin_first = first.parse().unwrap_or(false);
        }

        config
    }

    /// Creates a configuration with placeholder credentials for tests.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.server.auth_token = "test-token".to_string();
        config.server.webhook_secret = Some("hook-secret".to_string());
        config.tmdb.api_key = "tmdb-test-key".to_string();
        config.telegram.bot_token = "123:telegram-test".to_string();
        config.network.request_timeout = Duration::from_secs(2);
        config
    }

    /// Checks that every credential the server needs is present.
    ///
    /// # Errors
    ///
    /// - `ReelpostError::Configuration` - If a required secret is empty
    pub fn validate(&self) -> Result<(), ReelpostError> {
        let required = [
            ("AUTH_TOKEN", &self.server.auth_token),
            ("TMDB_API_KEY", &self.tmdb.api_key),
            ("TELEGRAM_BOT_TOKEN", &self.telegram.bot_token),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ReelpostError::Configuration {
                    reason: format!("Missing {name}"),
                });
            }
        }

        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ReelpostConfig::default();

        assert_eq!(config.compose.plot_budget, 200);
        assert_eq!(config.network.request_timeout, Duration::from_secs(10));
        assert_eq!(config.tmdb.api_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.telegram.api_base_url, "https://api.telegram.org");
        assert!(config.omdb.api_key.is_none());
        assert!(!config.delivery.verify_admin_first);
    }

    #[test]
    fn test_validate_names_missing_secret() {
        let mut config = ReelpostConfig::for_testing();
        assert!(config.validate().is_ok());

        config.telegram.bot_token.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("REELPOST_REQUEST_TIMEOUT", "3");
            std::env::set_var("REELPOST_PLOT_BUDGET", "265");
            std::env::set_var("REELPOST_VERIFY_ADMIN_FIRST", "true");
            std::env::set_var("REELPOST_TMDB_API_URL", "http://127.0.0.1:9000/3/");
            std::env::set_var("OMDB_API_KEY", "  ");
        }

        let config = ReelpostConfig::from_env();

        assert_eq!(config.network.request_timeout, Duration::from_secs(3));
        assert_eq!(config.compose.plot_budget, 265);
        assert!(config.delivery.verify_admin_first);
        assert_eq!(config.tmdb.api_base_url, "http://127.0.0.1:9000/3");
        assert!(config.omdb.api_key.is_none());

        // Cleanup
        unsafe {
            std::env::remove_var("REELPOST_REQUEST_TIMEOUT");
            std::env::remove_var("REELPOST_PLOT_BUDGET");
            std::env::remove_var("REELPOST_VERIFY_ADMIN_FIRST");
            std::env::remove_var("REELPOST_TMDB_API_URL");
            std::env::remove_var("OMDB_API_KEY");
        }
    }
}
