use crate::client::StatsClient;
use crate::error::FetchError;
use crate::filter::ContentFilter;
use crate::merge::MergeEngine;
use crate::metadata::Catalog;
use crate::models::{ContentKind, MergedRecord, StatSnapshot};
use crate::ranking::{RankedEntry, Ranker, SortMode};
use crate::search;
use crate::utils::format_compact;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSummary {
    pub count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for LeaderboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tracked, {} views, {} likes",
            self.count,
            format_compact(self.total_views),
            format_compact(self.total_likes)
        )?;
        if let Some(updated_at) = self.updated_at {
            write!(f, " (updated {})", updated_at.format("%H:%M:%S UTC"))?;
        }
        Ok(())
    }
}

/// One visitor's leaderboard: the loaded catalog plus all state that carries
/// over between refresh cycles.
pub struct LeaderboardSession {
    catalog: Catalog,
    merger: MergeEngine,
    filter: ContentFilter,
    ranker: Ranker,
    sort_mode: SortMode,
    search_query: String,
    merged: Vec<MergedRecord>,
    updated_at: Option<DateTime<Utc>>,
}

impl LeaderboardSession {
    pub fn new(catalog: Catalog, filter: ContentFilter) -> Self {
        let kind = catalog.kind();
        Self {
            catalog,
            merger: MergeEngine::new(),
            filter,
            ranker: Ranker::new(kind),
            sort_mode: SortMode::default(),
            search_query: String::new(),
            merged: Vec::new(),
            updated_at: None,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.catalog.kind()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Stores the mode that will actually apply to this content kind.
    pub fn set_sort_mode(&mut self, mode: SortMode) -> SortMode {
        self.sort_mode = mode.for_kind(self.kind());
        self.sort_mode
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    /// Fetches live stats and rebuilds the leaderboard.
    pub async fn refresh(&mut self, client: &StatsClient) -> Result<Vec<RankedEntry>, FetchError> {
        let ids = self.catalog.video_ids();
        info!(
            "Refreshing {} leaderboard ({} videos)",
            self.kind().key(),
            ids.len()
        );
        let snapshots = client.fetch_stats(&ids).await?;
        Ok(self.apply_snapshots(&snapshots))
    }

    /// Merges a fetched batch into the session and ranks the result.
    pub fn apply_snapshots(&mut self, snapshots: &[StatSnapshot]) -> Vec<RankedEntry> {
        let merged = match &self.catalog {
            Catalog::Ads(ads) => self.merger.merge_ads(ads, snapshots),
            Catalog::Halftime(shows) => self.merger.merge_shows(shows, snapshots),
        };
        self.merged = self.filter.apply(merged);
        self.updated_at = Some(Utc::now());
        self.rerank()
    }

    /// Ranks the current records under the current sort mode and search,
    /// without fetching.
    pub fn rerank(&mut self) -> Vec<RankedEntry> {
        let visible = search::filter_records(&self.merged, &self.search_query);
        self.ranker.rank(&visible, self.sort_mode)
    }

    pub fn summary(&self) -> LeaderboardSummary {
        LeaderboardSummary {
            count: self.merged.len(),
            total_views: self.merged.iter().map(|r| r.view_count).sum(),
            total_likes: self.merged.iter().map(|r| r.like_count).sum(),
            updated_at: self.updated_at,
        }
    }

    /// Display names for picked ids; unknown ids are shown as-is.
    pub fn pick_labels(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.merged
                    .iter()
                    .find(|record| &record.id == id)
                    .map(|record| record.display_name().to_string())
                    .unwrap_or_else(|| id.clone())
            })
            .collect()
    }
}
