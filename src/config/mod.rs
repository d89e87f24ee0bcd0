//! Process configuration, read once at startup from the environment.

use std::env;

/// Delay range applied before each scheduled bot action, so bot play
/// reads as deliberation rather than an instant response.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    pub bot_delay_min_ms: u64,
    pub bot_delay_max_ms: u64,
}

impl PacingConfig {
    /// No delays at all; used by tests that drive rooms synchronously.
    pub fn zero() -> Self {
        Self {
            bot_delay_min_ms: 0,
            bot_delay_max_ms: 0,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            bot_delay_min_ms: 1000,
            bot_delay_max_ms: 2500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub pacing: PacingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_parsed("PORT", 8080);
        let pacing = PacingConfig {
            bot_delay_min_ms: env_parsed("BOT_DELAY_MIN_MS", 1000),
            bot_delay_max_ms: env_parsed("BOT_DELAY_MAX_MS", 2500),
        };
        Self { host, port, pacing }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
