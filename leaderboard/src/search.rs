use crate::models::{MergedRecord, RecordDetails};

/// Case-insensitive substring match over the fields a visitor would search
/// by. A blank query matches everything.
pub fn matches(record: &MergedRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let contains = |field: &str| field.to_lowercase().contains(&query);

    match &record.details {
        RecordDetails::Ad(ad) => {
            ad.celebrity.as_deref().is_some_and(contains)
                || contains(&ad.brand)
                || contains(&ad.ad_title)
                || contains(&ad.category)
        }
        RecordDetails::Halftime(show) => {
            contains(&show.artist)
                || show.featuring.as_deref().is_some_and(contains)
                || contains(&show.songs)
                || contains(&show.super_bowl)
        }
    }
}

pub fn filter_records(records: &[MergedRecord], query: &str) -> Vec<MergedRecord> {
    records
        .iter()
        .filter(|record| matches(record, query))
        .cloned()
        .collect()
}
