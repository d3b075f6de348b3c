// tests/indexnow_adapter.rs
use std::sync::Arc;

use search_notify::config::HttpSettings;
use search_notify::notify::IndexNowAdapter;
use search_notify::transport::{MockTransport, ReqwestTransport};
use search_notify::NotifyConfig;
use serde_json::Value as Json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "a1b2c3d4e5f6a7b8";

fn cfg() -> NotifyConfig {
    NotifyConfig::new("insurelimos.net", "https://insurelimos.net", KEY).expect("valid config")
}

fn batch() -> Vec<String> {
    vec![
        "https://insurelimos.net/".to_string(),
        "https://insurelimos.net/coverage".to_string(),
    ]
}

#[tokio::test]
async fn accepted_statuses_are_200_and_202() {
    for status in [200u16, 202] {
        let mock = Arc::new(MockTransport::with_status(status));
        let adapter = IndexNowAdapter::new(&cfg(), mock.clone());
        assert!(adapter.submit(&batch()).await, "status {status}");
        assert_eq!(mock.call_count(), 1);
    }
}

#[tokio::test]
async fn other_statuses_fail() {
    for status in [400u16, 403, 404, 422, 429, 500, 503] {
        let mock = Arc::new(MockTransport::with_status(status));
        let adapter = IndexNowAdapter::new(&cfg(), mock.clone());
        assert!(!adapter.submit(&batch()).await, "status {status}");
        assert_eq!(mock.call_count(), 1, "no retry on {status}");
    }
}

#[tokio::test]
async fn transport_error_is_false_not_panic() {
    let mock = Arc::new(MockTransport::failing("connection reset by peer"));
    let adapter = IndexNowAdapter::new(&cfg(), mock.clone());
    assert!(!adapter.submit(&batch()).await);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn payload_carries_host_key_location_and_urls() {
    let mock = Arc::new(MockTransport::with_status(200));
    let adapter = IndexNowAdapter::new(&cfg(), mock.clone());
    adapter.submit(&batch()).await;

    let req = &mock.requests()[0];
    let v: Json = serde_json::from_str(&req.body).expect("json body");
    assert_eq!(v["host"], "insurelimos.net");
    assert_eq!(v["key"], KEY);
    assert_eq!(
        v["keyLocation"],
        format!("https://insurelimos.net/{KEY}.txt")
    );
    assert_eq!(
        v["urlList"],
        serde_json::json!(["https://insurelimos.net/", "https://insurelimos.net/coverage"])
    );
}

#[tokio::test]
async fn reqwest_transport_posts_json_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/IndexNow"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_json(serde_json::json!({
            "host": "insurelimos.net",
            "key": KEY,
            "keyLocation": format!("https://insurelimos.net/{KEY}.txt"),
            "urlList": ["https://insurelimos.net/", "https://insurelimos.net/coverage"],
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = cfg().with_endpoints(
        format!("{}/IndexNow", server.uri()),
        format!("{}/SubmitUrlBatch", server.uri()),
    );
    let transport = Arc::new(ReqwestTransport::new(&HttpSettings::default()).expect("client"));
    let adapter = IndexNowAdapter::new(&cfg, transport);
    assert!(adapter.submit(&batch()).await);
}

#[tokio::test]
async fn reqwest_transport_maps_server_error_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/IndexNow"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let cfg = cfg().with_endpoints(
        format!("{}/IndexNow", server.uri()),
        format!("{}/SubmitUrlBatch", server.uri()),
    );
    let transport = Arc::new(ReqwestTransport::new(&HttpSettings::default()).expect("client"));
    let adapter = IndexNowAdapter::new(&cfg, transport);
    assert!(!adapter.submit(&batch()).await);
}
