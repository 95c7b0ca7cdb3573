use adbowl_leaderboard::client::StatsClient;
use adbowl_leaderboard::config::{init_logger, load_environment, LeaderboardConfig};
use adbowl_leaderboard::filter::{load_blocklist, ContentFilter};
use adbowl_leaderboard::metadata::load_catalog;
use adbowl_leaderboard::picks::{JsonFilePickStore, PickSet};
use adbowl_leaderboard::scheduler::{run_cycle, start_refresh_scheduler, RefreshContext};
use adbowl_leaderboard::session::LeaderboardSession;
use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    load_environment();
    init_logger();

    let config = LeaderboardConfig::from_env()?;

    let catalog = load_catalog(config.content_kind, config.metadata_path())?;
    if catalog.is_empty() {
        warn!(
            "No entries in {}, nothing to rank.",
            config.metadata_path().display()
        );
        return Ok(());
    }
    info!(
        "Loaded {} {} entries",
        catalog.len(),
        config.content_kind.key()
    );

    let filter = match &config.blocklist_path {
        Some(path) => ContentFilter::new(&config.target_year, load_blocklist(path)?),
        None => ContentFilter::with_default_blocklist(&config.target_year),
    };

    let mut picks = PickSet::load(Box::new(JsonFilePickStore::new(&config.picks_dir)));
    picks.set_on_change(|ids| info!("Picks updated: {}", ids.join(", ")));
    picks.load_shared(&config.shared_picks)?;

    let mut session = LeaderboardSession::new(catalog, filter);
    let sort_mode = session.set_sort_mode(config.sort_mode);
    if sort_mode != config.sort_mode {
        warn!(
            "Sort mode '{}' does not apply to {}, using '{}'",
            config.sort_mode.key(),
            config.content_kind.key(),
            sort_mode.key()
        );
    }
    session.set_search_query(&config.search_query);

    let ctx = RefreshContext {
        session: Arc::new(Mutex::new(session)),
        client: StatsClient::new(&config.proxy_url, config.request_timeout)?,
        picks: Arc::new(Mutex::new(picks)),
        output_path: config.output_path.clone(),
    };

    run_cycle(&ctx).await;
    let mut scheduler = start_refresh_scheduler(ctx, &config.refresh_schedule).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down.");
    scheduler.shutdown().await?;

    Ok(())
}
