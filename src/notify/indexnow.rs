// src/notify/indexnow.rs
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{NotifyConfig, SiteIdentity};
use crate::metrics::{record_submission, Outcome};
use crate::transport::{HttpTransport, OutboundRequest};

pub const ENGINE: &str = "indexnow";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexNowPayload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: String,
    url_list: &'a [String],
}

/// Pushes URL batches to the IndexNow aggregator.
pub struct IndexNowAdapter {
    site: SiteIdentity,
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl IndexNowAdapter {
    pub fn new(cfg: &NotifyConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            site: cfg.site.clone(),
            endpoint: cfg.endpoints.indexnow.clone(),
            transport,
        }
    }

    pub fn build_body(&self, urls: &[String]) -> String {
        let payload = IndexNowPayload {
            host: &self.site.host,
            key: &self.site.indexnow_key,
            key_location: self.site.key_location(),
            url_list: urls,
        };
        // Plain strings only; serialization cannot fail.
        serde_json::to_string(&payload).unwrap_or_default()
    }

    /// 200 or 202 counts as accepted. Never errors; failures are logged.
    pub async fn submit(&self, urls: &[String]) -> bool {
        let t0 = Instant::now();
        let req = OutboundRequest {
            url: self.endpoint.clone(),
            content_type: CONTENT_TYPE,
            body: self.build_body(urls),
        };

        let outcome = match self.transport.post(req).await {
            Ok(rsp) if matches!(rsp.status, 200 | 202) => {
                info!(
                    target: "search_notify",
                    engine = ENGINE,
                    urls = urls.len(),
                    status = rsp.status,
                    "IndexNow submission accepted"
                );
                Outcome::Ok
            }
            Ok(rsp) => {
                warn!(
                    target: "search_notify",
                    engine = ENGINE,
                    status = rsp.status,
                    "IndexNow submission failed"
                );
                Outcome::Rejected
            }
            Err(e) => {
                warn!(target: "search_notify", engine = ENGINE, error = ?e, "IndexNow request error");
                Outcome::TransportError
            }
        };

        record_submission(ENGINE, outcome, urls.len(), t0.elapsed().as_secs_f64() * 1_000.0);
        outcome == Outcome::Ok
    }
}
