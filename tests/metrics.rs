// tests/metrics.rs
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use search_notify::transport::MockTransport;
use search_notify::{NotifyConfig, SearchNotifier};

#[tokio::test]
async fn submission_counters_are_exposed() {
    // Install a local recorder for this test binary
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("recorder");

    let cfg = NotifyConfig::new("insurelimos.net", "https://insurelimos.net", "a1b2c3d4e5f6a7b8")
        .expect("valid config");
    let mock = Arc::new(MockTransport::with_status(200));
    let notifier = SearchNotifier::with_transport(&cfg, mock);
    let r = notifier.submit_single_url("/faq").await;
    assert!(r.index_now);
    assert!(!r.bing);

    let out = handle.render();
    assert!(out.contains("search_submit_total"));
    assert!(out.contains("search_submit_urls_total"));
    assert!(out.contains("search_submit_ms"));
    assert!(out.contains(r#"outcome="ok""#));
    assert!(out.contains(r#"outcome="not_configured""#));
}
