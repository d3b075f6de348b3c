// src/metrics.rs
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

/// How a single engine submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Rejected,
    TransportError,
    NotConfigured,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Rejected => "rejected",
            Outcome::TransportError => "transport_error",
            Outcome::NotConfigured => "not_configured",
        }
    }
}

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "search_submit_total",
            "Search-engine submissions by engine and outcome."
        );
        describe_counter!(
            "search_submit_urls_total",
            "URLs sent to a search engine (attempted submissions only)."
        );
        describe_histogram!(
            "search_submit_ms",
            "Round-trip time of a search-engine submission in milliseconds."
        );
    });
}

pub fn record_submission(engine: &'static str, outcome: Outcome, urls: usize, elapsed_ms: f64) {
    ensure_metrics_described();
    counter!("search_submit_total", "engine" => engine, "outcome" => outcome.as_str()).increment(1);
    if outcome != Outcome::NotConfigured {
        counter!("search_submit_urls_total", "engine" => engine).increment(urls as u64);
        histogram!("search_submit_ms", "engine" => engine).record(elapsed_ms);
    }
}
