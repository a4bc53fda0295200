//! Douban subject lookup.
//!
//! Used only to bridge a Douban ID to a title and year. The mirror is
//! unreliable, so every failure is reported as "no record".

use crate::models::config::DoubanSettings;
use crate::models::media::SecondaryRecord;
use crate::Result;
use serde_json::Value;
use std::time::Duration;

/// Douban API client.
pub struct DoubanClient {
    api_base: String,
    client: reqwest::Client,
}

impl DoubanClient {
    /// Create a new Douban client.
    pub fn new(settings: &DoubanSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .build()?;
        Ok(Self {
            api_base: settings.api_base.clone(),
            client,
        })
    }

    /// Look up a subject. Never fails.
    pub async fn lookup(&self, douban_id: &str) -> Option<SecondaryRecord> {
        match self.fetch(douban_id).await {
            Ok(value) => parse_subject(&value),
            Err(e) => {
                tracing::debug!("Douban lookup failed for {}: {}", douban_id, e);
                None
            }
        }
    }

    async fn fetch(&self, douban_id: &str) -> Result<Value> {
        let url = format!("{}{}", self.api_base, douban_id);
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }
}

/// Extract title and year. The mirror returns the year as a string or a
/// number. A body with neither is no record.
fn parse_subject(value: &Value) -> Option<SecondaryRecord> {
    let text = |key: &str| match value.get(key) {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
    .filter(|s| !s.is_empty());

    let record = SecondaryRecord {
        title: text("title"),
        year: text("year"),
    };
    if record.title.is_none() && record.year.is_none() {
        return None;
    }
    Some(record)
}
