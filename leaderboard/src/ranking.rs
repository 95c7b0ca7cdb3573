use crate::models::{ContentKind, MergedRecord};
use crate::utils::compare_desc_float;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Views,
    Engagement,
    /// Ads only.
    Trending,
    /// Halftime shows only.
    Year,
}

impl SortMode {
    pub fn key(&self) -> &'static str {
        match self {
            SortMode::Views => "views",
            SortMode::Engagement => "engagement",
            SortMode::Trending => "trending",
            SortMode::Year => "year",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "views" => Some(SortMode::Views),
            "engagement" => Some(SortMode::Engagement),
            "trending" => Some(SortMode::Trending),
            "year" => Some(SortMode::Year),
            _ => None,
        }
    }

    pub fn supports(&self, kind: ContentKind) -> bool {
        match self {
            SortMode::Views | SortMode::Engagement => true,
            SortMode::Trending => kind == ContentKind::Ads,
            SortMode::Year => kind == ContentKind::Halftime,
        }
    }

    /// The mode actually applied for `kind`; unsupported modes fall back to views.
    pub fn for_kind(self, kind: ContentKind) -> Self {
        if self.supports(kind) {
            self
        } else {
            SortMode::Views
        }
    }
}

/// Stable descending sort by `mode`. Ties keep input order.
pub fn sort_records(records: &[MergedRecord], mode: SortMode) -> Vec<MergedRecord> {
    let mut sorted = records.to_vec();
    match mode {
        SortMode::Views => sorted.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        SortMode::Engagement => {
            sorted.sort_by(|a, b| compare_desc_float(a.engagement_rate(), b.engagement_rate()))
        }
        SortMode::Trending => sorted.sort_by(|a, b| b.trending.cmp(&a.trending)),
        SortMode::Year => {
            sorted.sort_by(|a, b| b.year().unwrap_or(0).cmp(&a.year().unwrap_or(0)))
        }
    }
    sorted
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    /// Positive when the entry moved up since the previous ranking.
    pub rank_delta: i64,
    pub record: MergedRecord,
}

/// Ranks records and remembers positions between renders of one session.
#[derive(Debug)]
pub struct Ranker {
    kind: ContentKind,
    previous_ranks: HashMap<String, usize>,
}

impl Ranker {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            previous_ranks: HashMap::new(),
        }
    }

    /// Sorts, assigns ranks and deltas, then replaces the remembered ranks
    /// with this ranking.
    pub fn rank(&mut self, records: &[MergedRecord], mode: SortMode) -> Vec<RankedEntry> {
        let sorted = sort_records(records, mode.for_kind(self.kind));
        let mut new_ranks = HashMap::with_capacity(sorted.len());

        let entries = sorted
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let rank = index + 1;
                let key = record.rank_key();
                let rank_delta = self
                    .previous_ranks
                    .get(&key)
                    .map(|&previous| previous as i64 - rank as i64)
                    .unwrap_or(0);
                new_ranks.entry(key).or_insert(rank);
                RankedEntry {
                    rank,
                    rank_delta,
                    record,
                }
            })
            .collect();

        self.previous_ranks = new_ranks;
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdDetails, HalftimeDetails, RecordDetails};

    fn ad(id: &str, views: u64, likes: u64, comments: u64, trending: i64) -> MergedRecord {
        MergedRecord {
            id: id.to_string(),
            title: String::new(),
            channel_title: String::new(),
            thumbnail: String::new(),
            published_at: String::new(),
            view_count: views,
            like_count: likes,
            comment_count: comments,
            trending,
            details: RecordDetails::Ad(AdDetails {
                brand: id.to_uppercase(),
                ad_title: String::new(),
                category: String::new(),
                celebrity: None,
            }),
        }
    }

    fn show(id: &str, views: u64, year: i32) -> MergedRecord {
        let mut record = ad(id, views, 0, 0, 0);
        record.details = RecordDetails::Halftime(HalftimeDetails {
            artist: id.to_string(),
            featuring: None,
            year,
            super_bowl: String::new(),
            songs: String::new(),
        });
        record
    }

    fn ids(records: &[MergedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn views_sort_descending() {
        let records = vec![ad("a", 10, 0, 0, 0), ad("b", 30, 0, 0, 0), ad("c", 20, 0, 0, 0)];
        assert_eq!(ids(&sort_records(&records, SortMode::Views)), ["b", "c", "a"]);
    }

    #[test]
    fn engagement_treats_unwatched_as_zero() {
        let records = vec![
            ad("unwatched", 0, 5, 0, 0),
            ad("low", 1000, 10, 0, 0),
            ad("high", 100, 40, 10, 0),
        ];
        assert_eq!(records[0].engagement_rate(), 0.0);
        assert_eq!(
            ids(&sort_records(&records, SortMode::Engagement)),
            ["high", "low", "unwatched"]
        );
    }

    #[test]
    fn trending_and_year_sorts() {
        let ads = vec![ad("a", 1, 0, 0, 5), ad("b", 1, 0, 0, 50), ad("c", 1, 0, 0, -2)];
        assert_eq!(ids(&sort_records(&ads, SortMode::Trending)), ["b", "a", "c"]);

        let shows = vec![show("old", 900, 2001), show("new", 10, 2025), show("mid", 50, 2015)];
        assert_eq!(ids(&sort_records(&shows, SortMode::Year)), ["new", "mid", "old"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            ad("first", 100, 1, 0, 3),
            ad("second", 100, 1, 0, 3),
            ad("third", 100, 1, 0, 3),
        ];
        for mode in [SortMode::Views, SortMode::Engagement, SortMode::Trending] {
            assert_eq!(
                ids(&sort_records(&records, mode)),
                ["first", "second", "third"]
            );
        }
    }

    #[test]
    fn unsupported_mode_falls_back_to_views() {
        assert_eq!(SortMode::Year.for_kind(ContentKind::Ads), SortMode::Views);
        assert_eq!(SortMode::Trending.for_kind(ContentKind::Halftime), SortMode::Views);
        assert_eq!(SortMode::Trending.for_kind(ContentKind::Ads), SortMode::Trending);

        let mut ranker = Ranker::new(ContentKind::Ads);
        let records = vec![ad("a", 10, 0, 0, 0), ad("b", 20, 0, 0, 0)];
        let ranked = ranker.rank(&records, SortMode::Year);
        assert_eq!(ranked[0].record.id, "b");
    }

    #[test]
    fn rank_delta_tracks_movement_between_renders() {
        let mut ranker = Ranker::new(ContentKind::Ads);

        let first = ranker.rank(
            &[ad("a", 30, 0, 0, 0), ad("b", 20, 0, 0, 0), ad("c", 10, 0, 0, 0)],
            SortMode::Views,
        );
        assert!(first.iter().all(|entry| entry.rank_delta == 0));
        assert_eq!(first.iter().map(|e| e.rank).collect::<Vec<_>>(), [1, 2, 3]);

        let second = ranker.rank(
            &[ad("a", 30, 0, 0, 0), ad("b", 20, 0, 0, 0), ad("c", 99, 0, 0, 0), ad("d", 1, 0, 0, 0)],
            SortMode::Views,
        );
        let delta = |id: &str| second.iter().find(|e| e.record.id == id).unwrap().rank_delta;
        assert_eq!(delta("c"), 2);
        assert_eq!(delta("a"), -1);
        assert_eq!(delta("b"), -1);
        assert_eq!(delta("d"), 0);
    }

    #[test]
    fn shows_without_video_keep_separate_rank_history() {
        let mut ranker = Ranker::new(ContentKind::Halftime);
        let mut upcoming = show("", 0, 2026);
        upcoming.details = RecordDetails::Halftime(HalftimeDetails {
            artist: "Upcoming".to_string(),
            featuring: None,
            year: 2026,
            super_bowl: "LX".to_string(),
            songs: String::new(),
        });
        let mut lost = show("", 0, 1967);
        lost.details = RecordDetails::Halftime(HalftimeDetails {
            artist: "Marching Band".to_string(),
            featuring: None,
            year: 1967,
            super_bowl: "I".to_string(),
            songs: String::new(),
        });
        let records = vec![show("uploaded", 100, 2024), upcoming, lost];

        ranker.rank(&records, SortMode::Views);
        let again = ranker.rank(&records, SortMode::Views);

        assert_eq!(again.iter().map(|e| e.rank).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(again.iter().all(|entry| entry.rank_delta == 0));

        let by_year = ranker.rank(&records, SortMode::Year);
        let ranks: Vec<_> = by_year
            .iter()
            .map(|e| (e.record.display_name(), e.rank, e.rank_delta))
            .collect();
        assert_eq!(
            ranks,
            [("Upcoming", 1, 1), ("uploaded", 2, -1), ("Marching Band", 3, 0)]
        );
    }

    #[test]
    fn sort_keys_round_trip() {
        for mode in [
            SortMode::Views,
            SortMode::Engagement,
            SortMode::Trending,
            SortMode::Year,
        ] {
            assert_eq!(SortMode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(SortMode::from_key("likes"), None);
    }
}
