use crate::client::StatsClient;
use crate::error::FetchError;
use crate::picks::PickSet;
use crate::ranking::RankedEntry;
use crate::session::{LeaderboardSession, LeaderboardSummary};
use crate::utils::{format_number, format_rank_delta};
use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Everything a refresh tick needs. Cheap to clone into scheduler jobs.
#[derive(Clone)]
pub struct RefreshContext {
    pub session: Arc<Mutex<LeaderboardSession>>,
    pub client: StatsClient,
    pub picks: Arc<Mutex<PickSet>>,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Completed(Vec<RankedEntry>),
    /// The previous cycle was still running.
    Skipped,
    Failed(FetchError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardSnapshot<'a> {
    kind: &'static str,
    sort: &'static str,
    summary: &'a LeaderboardSummary,
    entries: &'a [RankedEntry],
    picks: Vec<String>,
}

/// Runs one refresh cycle unless another one holds the session.
pub async fn run_cycle(ctx: &RefreshContext) -> CycleOutcome {
    let Ok(mut session) = ctx.session.try_lock() else {
        warn!("Previous refresh still running, skipping this tick.");
        return CycleOutcome::Skipped;
    };

    let entries = match session.refresh(&ctx.client).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Refresh failed: {e}");
            return CycleOutcome::Failed(e);
        }
    };

    let summary = session.summary();
    info!("Leaderboard refreshed: {summary}");
    log_entries(&entries);

    let picks = ctx.picks.lock().await.ids();
    if !picks.is_empty() {
        info!("My Top {}: {}", picks.len(), session.pick_labels(&picks).join(", "));
    }

    if let Some(path) = &ctx.output_path {
        let snapshot = LeaderboardSnapshot {
            kind: session.kind().key(),
            sort: session.sort_mode().key(),
            summary: &summary,
            entries: &entries,
            picks,
        };
        if let Err(e) = write_snapshot(path, &snapshot) {
            error!("Failed to write leaderboard snapshot: {e:?}");
        }
    }

    CycleOutcome::Completed(entries)
}

pub async fn start_refresh_scheduler(ctx: RefreshContext, schedule: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let refresh_job = Job::new_async(schedule, move |_uuid, _l| {
        let ctx = ctx.clone();
        Box::pin(async move {
            run_cycle(&ctx).await;
        })
    })?;

    scheduler.add(refresh_job).await?;
    scheduler.start().await?;
    info!("Refresh scheduler started ({schedule}).");

    Ok(scheduler)
}

fn log_entries(entries: &[RankedEntry]) {
    for entry in entries {
        let record = &entry.record;
        info!(
            "{:>3}. {:<32} {:>14} views {:>6}",
            entry.rank,
            record.display_name(),
            format_number(record.view_count),
            format_rank_delta(entry.rank_delta)
        );
    }
}

fn write_snapshot(path: &Path, snapshot: &LeaderboardSnapshot<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("Writing {}", path.display()))?;
    Ok(())
}
