// src/notify/bing.rs
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{NotifyConfig, SiteIdentity};
use crate::metrics::{record_submission, Outcome};
use crate::transport::{HttpTransport, OutboundRequest};

pub const ENGINE: &str = "bing";
pub const CONTENT_TYPE: &str = "application/xml; charset=utf-8";

const API_NS: &str = "http://schemas.datacontract.org/2004/07/Microsoft.Bing.Webmaster.Api";
const ARRAYS_NS: &str = "http://schemas.microsoft.com/2003/10/Serialization/Arrays";

/// Pushes URL batches to Bing Webmaster Tools (`SubmitUrlBatch`, POX flavour).
pub struct BingWebmasterAdapter {
    site: SiteIdentity,
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl BingWebmasterAdapter {
    pub fn new(cfg: &NotifyConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            site: cfg.site.clone(),
            endpoint: cfg.endpoints.bing.clone(),
            transport,
        }
    }

    /// `SubmitUrlBatch` document. Every interpolated value is XML-escaped.
    pub fn build_body(&self, urls: &[String]) -> String {
        let mut xml = String::with_capacity(256 + urls.len() * 128);
        xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        let _ = writeln!(xml, "<SubmitUrlBatch xmlns=\"{API_NS}\">");
        let _ = writeln!(xml, "<siteUrl>{}</siteUrl>", xml_escape(&self.site.base_url));
        xml.push_str("<urlList>\n");
        for url in urls {
            let _ = writeln!(
                xml,
                "<string xmlns=\"{ARRAYS_NS}\">{}</string>",
                xml_escape(url)
            );
        }
        xml.push_str("</urlList>\n");
        xml.push_str("</SubmitUrlBatch>");
        xml
    }

    fn request_url(&self, api_key: &str) -> String {
        match reqwest::Url::parse_with_params(&self.endpoint, &[("apikey", api_key)]) {
            Ok(u) => u.to_string(),
            // Unparseable endpoint: let the transport report it.
            Err(_) => format!("{}?apikey={}", self.endpoint, api_key),
        }
    }

    /// Only 200 counts as accepted. Never errors; failures are logged.
    pub async fn submit(&self, urls: &[String]) -> bool {
        let Some(api_key) = self.site.bing_api_key.as_deref() else {
            warn!(
                target: "search_notify",
                engine = ENGINE,
                "Bing submission skipped: no API key configured"
            );
            record_submission(ENGINE, Outcome::NotConfigured, urls.len(), 0.0);
            return false;
        };

        let t0 = Instant::now();
        let req = OutboundRequest {
            url: self.request_url(api_key),
            content_type: CONTENT_TYPE,
            body: self.build_body(urls),
        };

        let outcome = match self.transport.post(req).await {
            Ok(rsp) if rsp.status == 200 => {
                info!(
                    target: "search_notify",
                    engine = ENGINE,
                    urls = urls.len(),
                    status = rsp.status,
                    "Bing submission accepted"
                );
                Outcome::Ok
            }
            Ok(rsp) => {
                warn!(
                    target: "search_notify",
                    engine = ENGINE,
                    status = rsp.status,
                    body = %rsp.body,
                    "Bing submission failed"
                );
                Outcome::Rejected
            }
            Err(e) => {
                warn!(target: "search_notify", engine = ENGINE, error = ?e, "Bing request error");
                Outcome::TransportError
            }
        };

        record_submission(ENGINE, outcome, urls.len(), t0.elapsed().as_secs_f64() * 1_000.0);
        outcome == Outcome::Ok
    }
}

/// Values only ever land in text nodes: `&`, `<` and `>` need escaping.
fn xml_escape(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn cfg() -> NotifyConfig {
        NotifyConfig::new("insurelimos.net", "https://insurelimos.net", "a1b2c3d4e5f6a7b8")
            .unwrap()
            .with_bing_api_key("bing-key-123")
    }

    #[test]
    fn body_matches_submit_url_batch_layout() {
        let a = BingWebmasterAdapter::new(&cfg(), Arc::new(MockTransport::with_status(200)));
        let body = a.build_body(&[
            "https://insurelimos.net/".to_string(),
            "https://insurelimos.net/faq".to_string(),
        ]);
        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<SubmitUrlBatch xmlns=\"http://schemas.datacontract.org/2004/07/Microsoft.Bing.Webmaster.Api\">\n\
<siteUrl>https://insurelimos.net</siteUrl>\n\
<urlList>\n\
<string xmlns=\"http://schemas.microsoft.com/2003/10/Serialization/Arrays\">https://insurelimos.net/</string>\n\
<string xmlns=\"http://schemas.microsoft.com/2003/10/Serialization/Arrays\">https://insurelimos.net/faq</string>\n\
</urlList>\n\
</SubmitUrlBatch>";
        assert_eq!(body, expected);
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let a = BingWebmasterAdapter::new(&cfg(), Arc::new(MockTransport::with_status(200)));
        let body = a.build_body(&["https://insurelimos.net/q?a=1&b=<2>".to_string()]);
        assert!(body.contains("https://insurelimos.net/q?a=1&amp;b=&lt;2&gt;"));
        assert!(!body.contains("&b="));
    }

    #[test]
    fn key_travels_in_query_string() {
        let a = BingWebmasterAdapter::new(&cfg(), Arc::new(MockTransport::with_status(200)));
        assert_eq!(
            a.request_url("bing-key-123"),
            "https://ssl.bing.com/webmaster/api.svc/pox/SubmitUrlBatch?apikey=bing-key-123"
        );
    }
}
