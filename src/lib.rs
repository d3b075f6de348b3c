// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod metrics;
pub mod notify;
pub mod routes;
pub mod transport;
pub mod urls;

// ---- Re-exports for stable public API ----
pub use crate::config::NotifyConfig;
pub use crate::notify::{SearchNotifier, SubmissionResult};
pub use crate::urls::{Trigger, UrlSetBuilder};
