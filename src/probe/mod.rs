use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::time::Instant;

use crate::client::ApiClient;
use crate::records::ContentType;

pub const PROBE_TIMEOUT_SECONDS: u64 = 5;

#[derive(Clone, Debug)]
pub struct EndpointHealth {
    pub content: ContentType,
    pub status: Option<u16>,
    pub latency_ms: u128,
    pub error: Option<String>,
}

impl EndpointHealth {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }
}

/// Pings every collection endpoint concurrently and reports status and
/// latency per endpoint, ordered by content type. Purely observational: an
/// unreachable endpoint is a reported status, not an error.
pub async fn probe_all(client: &ApiClient) -> Vec<EndpointHealth> {
    let timeout = Duration::from_secs(PROBE_TIMEOUT_SECONDS);
    let mut checks = FuturesUnordered::new();
    for content in ContentType::ALL {
        let client = client.clone();
        checks.push(async move { probe_one(&client, content, timeout).await });
    }

    let mut out: Vec<EndpointHealth> = Vec::with_capacity(ContentType::ALL.len());
    while let Some(health) = checks.next().await {
        out.push(health);
    }
    out.sort_by_key(|h| ContentType::ALL.iter().position(|c| *c == h.content));
    out
}

async fn probe_one(client: &ApiClient, content: ContentType, timeout: Duration) -> EndpointHealth {
    let start = Instant::now();
    match client.ping(content, timeout).await {
        Ok(status) => EndpointHealth {
            content,
            status: Some(status),
            latency_ms: start.elapsed().as_millis(),
            error: None,
        },
        Err(e) => EndpointHealth {
            content,
            status: None,
            latency_ms: start.elapsed().as_millis(),
            error: Some(e.to_string()),
        },
    }
}
