use crate::models::{AdMetadata, ContentKind, HalftimeMetadata};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct AdsDocument {
    #[serde(default)]
    ads: Vec<AdMetadata>,
}

#[derive(Debug, Deserialize)]
struct ShowsDocument {
    #[serde(default)]
    shows: Vec<HalftimeMetadata>,
}

/// Static metadata for one leaderboard, loaded once per session.
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    Ads(Vec<AdMetadata>),
    Halftime(Vec<HalftimeMetadata>),
}

impl Catalog {
    pub fn kind(&self) -> ContentKind {
        match self {
            Catalog::Ads(_) => ContentKind::Ads,
            Catalog::Halftime(_) => ContentKind::Halftime,
        }
    }

    /// Ids to request, in catalog order. Entries without a video are left out.
    pub fn video_ids(&self) -> Vec<String> {
        match self {
            Catalog::Ads(ads) => ads
                .iter()
                .map(AdMetadata::video_id)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect(),
            Catalog::Halftime(shows) => shows
                .iter()
                .filter_map(HalftimeMetadata::video_id)
                .map(String::from)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Catalog::Ads(ads) => ads.len(),
            Catalog::Halftime(shows) => shows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn parse_catalog(kind: ContentKind, raw: &str) -> Result<Catalog> {
    let catalog = match kind {
        ContentKind::Ads => {
            let doc: AdsDocument =
                serde_json::from_str(raw).context("Failed to parse ads metadata")?;
            Catalog::Ads(doc.ads)
        }
        ContentKind::Halftime => {
            let doc: ShowsDocument =
                serde_json::from_str(raw).context("Failed to parse halftime metadata")?;
            Catalog::Halftime(doc.shows)
        }
    };
    Ok(catalog)
}

pub fn load_catalog(kind: ContentKind, path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to load video IDs from {}", path.display()))?;
    parse_catalog(kind, &raw)
}
