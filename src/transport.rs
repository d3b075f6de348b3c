// src/transport.rs
use anyhow::{anyhow, Context, Result};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::HttpSettings;

/// One outbound POST. The body is already serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the search-engine adapters and the network.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// `Err` only for transport failures (DNS, TLS, reset, timeout).
    /// Any HTTP status, including 4xx/5xx, is `Ok`.
    async fn post(&self, req: OutboundRequest) -> Result<TransportResponse>;
}

/// Production transport on a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("building reqwest client")?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, req: OutboundRequest) -> Result<TransportResponse> {
        let rsp = self
            .http
            .post(&req.url)
            .header(reqwest::header::CONTENT_TYPE, req.content_type)
            .body(req.body)
            .send()
            .await
            .map_err(|e| anyhow!("POST failed: {}", e.without_url()))?;

        let status = rsp.status().as_u16();
        // Body is diagnostics only; an unreadable body is not a transport failure.
        let body = rsp.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}

type Responder = Box<dyn Fn(&OutboundRequest) -> Result<TransportResponse> + Send + Sync>;

/// Test transport: records every request and answers from a scripted responder,
/// optionally after a per-URL-prefix delay.
pub struct MockTransport {
    pub calls: Mutex<Vec<OutboundRequest>>,
    respond: Responder,
    delays: Vec<(String, Duration)>,
}

impl MockTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&OutboundRequest) -> Result<TransportResponse> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(vec![]),
            respond: Box::new(respond),
            delays: vec![],
        }
    }

    /// Requests whose URL starts with `prefix` answer only after `delay`.
    pub fn with_delay(mut self, prefix: impl Into<String>, delay: Duration) -> Self {
        self.delays.push((prefix.into(), delay));
        self
    }

    /// Every request gets `status` with an empty body.
    pub fn with_status(status: u16) -> Self {
        Self::new(move |_| {
            Ok(TransportResponse {
                status,
                body: String::new(),
            })
        })
    }

    /// Every request fails before a response arrives.
    pub fn failing(msg: &'static str) -> Self {
        Self::new(move |_| Err(anyhow!(msg)))
    }

    /// First entry whose URL prefix matches decides the status; 404 otherwise.
    pub fn by_prefix(routes: Vec<(String, u16)>) -> Self {
        Self::new(move |req| {
            let status = routes
                .iter()
                .find(|(prefix, _)| req.url.starts_with(prefix.as_str()))
                .map(|(_, s)| *s)
                .unwrap_or(404);
            Ok(TransportResponse {
                status,
                body: format!("mock status {status}"),
            })
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, req: OutboundRequest) -> Result<TransportResponse> {
        let delay = self
            .delays
            .iter()
            .find(|(prefix, _)| req.url.starts_with(prefix.as_str()))
            .map(|(_, d)| *d);
        let out = (self.respond)(&req);
        self.calls.lock().unwrap().push(req);

        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        out
    }
}
