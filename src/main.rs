use anyhow::{bail, Context, Result};
use chrono::Utc;
use ebay_feedback_export::{
    client::{types::FeedbackType, TradingClient},
    config::Config,
    export::{timestamped_output_path, write_reviews_xlsx},
    fetch::{fetch_all_feedback, FetchEnd},
    transform::build_reviews_export,
};
use reqwest::Client;
use std::{fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

const ENTRIES_PER_PAGE: u32 = 200;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) credentials, before any network activity ─────────────────
    let config = Config::from_env().context("loading eBay credentials from the environment")?;
    Url::parse(&config.base_url)
        .with_context(|| format!("EBAY_BASE_URL is not a valid URL: {}", config.base_url))?;

    // ─── 3) fetch all seller feedback ────────────────────────────────
    let client = TradingClient::new(Client::new(), &config);
    info!("fetching feedback from eBay");
    let fetched = fetch_all_feedback(&client, FeedbackType::FeedbackReceived, ENTRIES_PER_PAGE).await;
    if let FetchEnd::Truncated { page } = fetched.end {
        warn!(page, "fetch stopped early; exporting what was retrieved");
    }
    info!(rows = fetched.rows.len(), "total raw feedback rows fetched");
    if fetched.rows.is_empty() {
        bail!("no feedback rows returned from eBay");
    }

    // ─── 4) reshape into the review-import table ─────────────────────
    let reviews = build_reviews_export(&fetched.rows, &config.base_url)?;
    info!(rows = reviews.len(), "rows after filtering to seller feedback");

    // ─── 5) write the spreadsheet ────────────────────────────────────
    let output_dir = PathBuf::from("output");
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let out_path = timestamped_output_path(&output_dir, Utc::now());
    write_reviews_xlsx(&out_path, &reviews)?;
    info!(path = %out_path.display(), "done");

    Ok(())
}
