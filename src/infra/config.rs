//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:50051";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:50051";
pub const DEFAULT_NOTIFY_TIMEOUT_MS: u64 = 2_000;

/// Address the RPC server listens on.
pub fn bind_addr() -> String {
    std::env::var("MARKET_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Base URL the client talks to.
pub fn server_url() -> String {
    std::env::var("MARKET_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string())
}

/// Whether update/purchase notifications are delivered (off by default).
pub fn notifications_enabled() -> anyhow::Result<bool> {
    match std::env::var("MARKET_NOTIFICATIONS") {
        Ok(v) => parse_bool(&v).context("MARKET_NOTIFICATIONS must be true or false"),
        Err(_) => Ok(false),
    }
}

/// Per-delivery timeout for the HTTP notifier.
pub fn notify_timeout() -> anyhow::Result<Duration> {
    let ms = match std::env::var("MARKET_NOTIFY_TIMEOUT_MS") {
        Ok(v) => v
            .trim()
            .parse::<u64>()
            .context("MARKET_NOTIFY_TIMEOUT_MS must be a valid u64")?,
        Err(_) => DEFAULT_NOTIFY_TIMEOUT_MS,
    };
    Ok(Duration::from_millis(ms.max(1)))
}

fn parse_bool(v: &str) -> anyhow::Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow::anyhow!("not a boolean: {}", other)),
    }
}
