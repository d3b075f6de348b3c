// src/notify/mod.rs
//! Search-engine push notifications: IndexNow + Bing Webmaster, fanned out
//! concurrently. Best effort: every failure ends as `false` plus a log line.

pub mod bing;
pub mod indexnow;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::NotifyConfig;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::urls::{Trigger, UrlSetBuilder};

pub use bing::BingWebmasterAdapter;
pub use indexnow::IndexNowAdapter;

/// Per-engine outcome of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub index_now: bool,
    pub bing: bool,
}

impl SubmissionResult {
    pub fn all_ok(&self) -> bool {
        self.index_now && self.bing
    }

    pub fn any_ok(&self) -> bool {
        self.index_now || self.bing
    }
}

/// Dispatch coordinator. Stateless across calls; safe to share behind `Arc`.
pub struct SearchNotifier {
    urls: UrlSetBuilder,
    indexnow: IndexNowAdapter,
    bing: BingWebmasterAdapter,
}

impl SearchNotifier {
    /// Production wiring over a shared reqwest client.
    pub fn from_config(cfg: &NotifyConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&cfg.http)?);
        Ok(Self::with_transport(cfg, transport))
    }

    pub fn with_transport(cfg: &NotifyConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            urls: UrlSetBuilder::for_site(&cfg.site),
            indexnow: IndexNowAdapter::new(cfg, transport.clone()),
            bing: BingWebmasterAdapter::new(cfg, transport),
        }
    }

    pub fn urls(&self) -> &UrlSetBuilder {
        &self.urls
    }

    /// Both engines are always attempted; neither outcome affects the other.
    pub async fn submit_to_all_search_engines(&self, urls: &[String]) -> SubmissionResult {
        if urls.is_empty() {
            debug!(target: "search_notify", "empty URL batch, nothing to submit");
            return SubmissionResult::default();
        }

        let (index_now, bing) = tokio::join!(self.indexnow.submit(urls), self.bing.submit(urls));
        let result = SubmissionResult { index_now, bing };

        info!(
            target: "search_notify",
            urls = urls.len(),
            index_now = result.index_now,
            bing = result.bing,
            "search engine submission finished"
        );
        result
    }

    pub async fn submit_single_url(&self, path: &str) -> SubmissionResult {
        self.submit_to_all_search_engines(&self.urls.single(path))
            .await
    }

    pub async fn submit_blog_post(&self, slug: &str) -> SubmissionResult {
        self.submit_to_all_search_engines(&self.urls.blog_post(slug))
            .await
    }

    pub async fn submit_news_post(&self, slug: &str) -> SubmissionResult {
        self.submit_to_all_search_engines(&self.urls.news_post(slug))
            .await
    }

    pub async fn submit_all_site_pages(&self) -> SubmissionResult {
        self.submit_to_all_search_engines(&self.urls.all_site_pages())
            .await
    }

    pub async fn submit_location_pages(&self, city_slug: &str) -> SubmissionResult {
        self.submit_to_all_search_engines(&self.urls.location_pages(city_slug))
            .await
    }

    pub async fn submit_trigger(&self, trigger: &Trigger) -> SubmissionResult {
        self.submit_to_all_search_engines(&trigger.expand(&self.urls))
            .await
    }
}
