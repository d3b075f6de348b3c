//! search-notify: command-line entrypoint.
//! Pushes changed URLs to IndexNow and Bing Webmaster Tools.
//!
//! Usage: `search-notify <all|page PATH|blog SLUG|news SLUG|location CITY> [--dry-run]`

use anyhow::Context;
use search_notify::{NotifyConfig, SearchNotifier, Trigger, UrlSetBuilder};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_notify=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");
    args.retain(|a| a != "--dry-run");

    let trigger = Trigger::parse(&args[..]).context(
        "usage: search-notify <all|page PATH|blog SLUG|news SLUG|location CITY> [--dry-run]",
    )?;
    let cfg = NotifyConfig::load_default().context("loading notify config")?;

    if dry_run {
        for url in trigger.expand(&UrlSetBuilder::for_site(&cfg.site)) {
            println!("{url}");
        }
        return Ok(());
    }

    let notifier = SearchNotifier::from_config(&cfg)?;
    let result = notifier.submit_trigger(&trigger).await;
    println!("{}", serde_json::to_string(&result)?);

    if !result.any_ok() {
        std::process::exit(1);
    }
    Ok(())
}
