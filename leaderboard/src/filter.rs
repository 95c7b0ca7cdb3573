use crate::models::{MergedRecord, RecordDetails};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Broadcast, news and commentary channels that surface in ad searches but
/// are not advertisers. Compared trimmed and lowercased.
pub const DEFAULT_BLOCKED_BRANDS: &[&str] = &[
    "nfl",
    "abc news",
    "cbs news",
    "nbc news",
    "espn",
    "good morning america",
    "entertainment tonight",
    "fox news",
    "jimmy kimmel live",
    "the tonight show starring jimmy fallon",
    "late night with seth meyers",
    "yahoo entertainment",
    "page six",
];

/// Post-merge filter for ad records. Halftime records always pass.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    target_year: String,
    blocked_brands: HashSet<String>,
}

impl ContentFilter {
    pub fn new<I, S>(target_year: impl Into<String>, blocked_brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            target_year: target_year.into(),
            blocked_brands: blocked_brands
                .into_iter()
                .map(|brand| normalize_brand(brand.as_ref()))
                .filter(|brand| !brand.is_empty())
                .collect(),
        }
    }

    pub fn with_default_blocklist(target_year: impl Into<String>) -> Self {
        Self::new(target_year, DEFAULT_BLOCKED_BRANDS.iter().copied())
    }

    pub fn is_blocked_brand(&self, brand: &str) -> bool {
        self.blocked_brands.contains(&normalize_brand(brand))
    }

    pub fn allows(&self, record: &MergedRecord) -> bool {
        let RecordDetails::Ad(ad) = &record.details else {
            return true;
        };

        if !record.published_at.is_empty() && !record.published_at.starts_with(&self.target_year) {
            return false;
        }

        !self.is_blocked_brand(&ad.brand)
    }

    pub fn apply(&self, records: Vec<MergedRecord>) -> Vec<MergedRecord> {
        records
            .into_iter()
            .filter(|record| self.allows(record))
            .collect()
    }
}

/// Reads a JSON array of brand names.
pub fn load_blocklist(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read blocklist {}", path.display()))?;
    let brands: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("Blocklist {} is not a JSON array of strings", path.display()))?;
    Ok(brands)
}

fn normalize_brand(brand: &str) -> String {
    brand.trim().to_lowercase()
}
