// Best-effort delivery of notification messages to client endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body posted to `http://{endpoint}/notify`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    pub response: String,
}

/// Delivers a message string to a remote endpoint. Callers do not wait for
/// an acknowledgement and delivery failures are not reported back to them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, endpoint: &str, message: &str) -> anyhow::Result<()>;
}

/// Drops every message.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _endpoint: &str, _message: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct HttpNotifier {
    client: reqwest::Client,
}

impl HttpNotifier {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

/// Endpoints are stored as `ip:port`; anything already carrying a scheme is
/// used as-is.
pub fn notify_url(endpoint: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        format!("{}/notify", base)
    } else {
        format!("http://{}/notify", base)
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, endpoint: &str, message: &str) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(notify_url(endpoint))
            .json(&NotificationRequest {
                message: message.to_string(),
            })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "notification endpoint {} answered {}",
                endpoint,
                resp.status()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::notify_url;

    #[test]
    fn url_from_endpoint() {
        assert_eq!(notify_url("127.0.0.1:50053"), "http://127.0.0.1:50053/notify");
        assert_eq!(notify_url("http://host:1/"), "http://host:1/notify");
    }
}
