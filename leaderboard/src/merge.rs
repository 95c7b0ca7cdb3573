use crate::models::{
    AdDetails, AdMetadata, HalftimeDetails, HalftimeMetadata, MergedRecord, RecordDetails,
    StatSnapshot,
};
use crate::trending::TrendingTracker;
use std::collections::HashMap;

/// Joins static metadata with a batch of live stats. Owns the trending
/// history, which advances on every merge.
#[derive(Debug, Default)]
pub struct MergeEngine {
    trending: TrendingTracker,
}

impl MergeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_ads(
        &mut self,
        metadata: &[AdMetadata],
        snapshots: &[StatSnapshot],
    ) -> Vec<MergedRecord> {
        let deltas = self.trending.observe(snapshots);
        let stats = index_snapshots(snapshots);

        metadata
            .iter()
            .map(|meta| merge_ad(meta, stats.get(meta.video_id()).copied(), &deltas))
            .collect()
    }

    pub fn merge_shows(
        &mut self,
        metadata: &[HalftimeMetadata],
        snapshots: &[StatSnapshot],
    ) -> Vec<MergedRecord> {
        let deltas = self.trending.observe(snapshots);
        let stats = index_snapshots(snapshots);

        metadata
            .iter()
            .map(|meta| {
                let live = meta.video_id().and_then(|id| stats.get(id).copied());
                merge_show(meta, live, &deltas)
            })
            .collect()
    }
}

/// Keys snapshots by id. The first snapshot for an id wins.
pub fn index_snapshots(snapshots: &[StatSnapshot]) -> HashMap<&str, &StatSnapshot> {
    let mut index = HashMap::with_capacity(snapshots.len());
    for snapshot in snapshots {
        index.entry(snapshot.id.as_str()).or_insert(snapshot);
    }
    index
}

pub fn merge_ad(
    meta: &AdMetadata,
    live: Option<&StatSnapshot>,
    deltas: &HashMap<String, i64>,
) -> MergedRecord {
    let details = RecordDetails::Ad(AdDetails {
        brand: meta.brand.clone(),
        ad_title: meta.ad_title.clone(),
        category: meta.category.clone().unwrap_or_default(),
        celebrity: meta.celebrity.clone().filter(|c| !c.trim().is_empty()),
    });
    merged_record(meta.video_id(), live, deltas, details)
}

pub fn merge_show(
    meta: &HalftimeMetadata,
    live: Option<&StatSnapshot>,
    deltas: &HashMap<String, i64>,
) -> MergedRecord {
    let details = RecordDetails::Halftime(HalftimeDetails {
        artist: meta.artist.clone(),
        featuring: meta.featuring.clone().filter(|f| !f.trim().is_empty()),
        year: meta.year,
        super_bowl: meta.super_bowl.clone(),
        songs: meta.songs.clone().unwrap_or_default(),
    });
    merged_record(meta.video_id().unwrap_or_default(), live, deltas, details)
}

fn merged_record(
    id: &str,
    live: Option<&StatSnapshot>,
    deltas: &HashMap<String, i64>,
    details: RecordDetails,
) -> MergedRecord {
    match live {
        Some(live) => MergedRecord {
            id: id.to_string(),
            title: live.title.clone(),
            channel_title: live.channel_title.clone(),
            thumbnail: live.thumbnail.clone(),
            published_at: live.published_at.clone(),
            view_count: live.view_count,
            like_count: live.like_count,
            comment_count: live.comment_count,
            trending: deltas.get(id).copied().unwrap_or(0),
            details,
        },
        None => MergedRecord {
            id: id.to_string(),
            title: String::new(),
            channel_title: String::new(),
            thumbnail: String::new(),
            published_at: String::new(),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            trending: 0,
            details,
        },
    }
}
