//! Append-only metrics store
//!
//! [`MemoryStore`] holds every row ever saved, in insertion order. A batch
//! is appended under a single write-lock acquisition, and queries run under
//! the read lock, so a reader sees either none or all of a batch.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use types::metric::MetricRow;

use crate::filter::MetricsFilter;

/// Storage seam between the ingestion path and the read API.
pub trait MetricsStore: Send + Sync {
    /// Append `rows` to the end of the sequence, in argument order.
    fn save_metrics(&self, rows: Vec<MetricRow>);

    /// Rows in the date range and on the filter's channel, paginated.
    fn query_by_channel(&self, filter: &MetricsFilter) -> Vec<MetricRow>;

    /// Rows in the date range and on the filter's campaign, paginated.
    fn query_by_funnel(&self, filter: &MetricsFilter) -> Vec<MetricRow>;

    /// Total rows held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime, unbounded in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<MetricRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored row, oldest first.
    pub fn snapshot(&self) -> Vec<MetricRow> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<MetricRow>> {
        // Batches land through one `extend`, so a poisoned lock still holds whole batches.
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<MetricRow>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn query<F>(&self, filter: &MetricsFilter, matches: F) -> Vec<MetricRow>
    where
        F: Fn(&MetricsFilter, &MetricRow) -> bool,
    {
        let range = filter.date_range();
        let rows = self.read();
        let filtered: Vec<&MetricRow> = rows
            .iter()
            .filter(|row| range.contains(&row.date) && matches(filter, row))
            .collect();

        let page = filter.page_bounds(filtered.len());
        debug!(
            matched = filtered.len(),
            start = page.start,
            end = page.end,
            "Metrics query evaluated"
        );
        filtered[page].iter().map(|row| (*row).clone()).collect()
    }
}

impl MetricsStore for MemoryStore {
    fn save_metrics(&self, rows: Vec<MetricRow>) {
        let batch = rows.len();
        let mut stored = self.write();
        stored.extend(rows);
        debug!(batch, total = stored.len(), "Metrics batch appended");
    }

    fn query_by_channel(&self, filter: &MetricsFilter) -> Vec<MetricRow> {
        self.query(filter, MetricsFilter::matches_channel)
    }

    fn query_by_funnel(&self, filter: &MetricsFilter) -> Vec<MetricRow> {
        self.query(filter, MetricsFilter::matches_campaign)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_LIMIT;
    use types::attribution::AttributionKey;

    fn row(date: &str, channel: &str, campaign: &str) -> MetricRow {
        MetricRow::empty(
            date,
            channel,
            "C-1",
            AttributionKey::normalized(campaign, "google", "cpc"),
        )
    }

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.save_metrics(vec![
            row("2023-01-01", "google_ads", "spring"),
            row("2023-01-15", "meta_ads", "spring"),
            row("2023-02-01", "google_ads", "summer"),
        ]);
        store
    }

    #[test]
    fn test_save_appends_in_order() {
        let store = seeded();
        store.save_metrics(vec![row("2023-03-01", "tiktok", "autumn")]);
        let all = store.snapshot();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].date, "2023-01-01");
        assert_eq!(all[3].channel, "tiktok");
    }

    #[test]
    fn test_same_key_twice_is_two_rows() {
        let store = MemoryStore::new();
        store.save_metrics(vec![row("2023-01-01", "google_ads", "spring")]);
        store.save_metrics(vec![row("2023-01-01", "google_ads", "spring")]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let store = MemoryStore::new();
        store.save_metrics(Vec::new());
        assert!(store.is_empty());
        assert!(store.query_by_channel(&MetricsFilter::default()).is_empty());
    }

    #[test]
    fn test_query_by_channel() {
        let store = seeded();
        let filter = MetricsFilter {
            channel: "google_ads".to_string(),
            ..Default::default()
        };
        let rows = store.query_by_channel(&filter);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.channel == "google_ads"));
    }

    #[test]
    fn test_query_by_funnel() {
        let store = seeded();
        let filter = MetricsFilter {
            utm_campaign: "spring".to_string(),
            ..Default::default()
        };
        let rows = store.query_by_funnel(&filter);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.key.campaign == "spring"));
    }

    #[test]
    fn test_channel_query_ignores_campaign_and_vice_versa() {
        let store = seeded();
        let filter = MetricsFilter {
            channel: "google_ads".to_string(),
            utm_campaign: "summer".to_string(),
            ..Default::default()
        };
        assert_eq!(store.query_by_channel(&filter).len(), 2);
        assert_eq!(store.query_by_funnel(&filter).len(), 1);
    }

    #[test]
    fn test_inclusive_date_range() {
        let store = seeded();
        let filter = MetricsFilter {
            from: "2023-01-01".to_string(),
            to: "2023-01-15".to_string(),
            ..Default::default()
        };
        let rows = store.query_by_channel(&filter);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2023-01-01");
        assert_eq!(rows[1].date, "2023-01-15");
    }

    #[test]
    fn test_unparsable_row_date_excluded() {
        let store = seeded();
        store.save_metrics(vec![row("not-a-date", "google_ads", "spring")]);
        let rows = store.query_by_channel(&MetricsFilter::default());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.date != "not-a-date"));
    }

    #[test]
    fn test_limit_one_matches_first_of_default_page() {
        let store = seeded();
        let full = store.query_by_channel(&MetricsFilter::default());
        let first = store.query_by_channel(&MetricsFilter {
            limit: 1,
            ..Default::default()
        });
        assert_eq!(first.len(), 1);
        assert_eq!(first[0], full[0]);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let store = seeded();
        let filter = MetricsFilter {
            offset: 3,
            ..Default::default()
        };
        assert!(store.query_by_channel(&filter).is_empty());
        let filter = MetricsFilter {
            offset: 1_000,
            ..Default::default()
        };
        assert!(store.query_by_funnel(&filter).is_empty());
    }

    #[test]
    fn test_default_limit_caps_page() {
        let store = MemoryStore::new();
        let batch: Vec<MetricRow> = (0..120)
            .map(|_| row("2023-01-01", "google_ads", "spring"))
            .collect();
        store.save_metrics(batch);

        assert_eq!(store.query_by_channel(&MetricsFilter::default()).len(), DEFAULT_LIMIT);

        let tail = store.query_by_channel(&MetricsFilter {
            offset: 100,
            limit: -1,
            ..Default::default()
        });
        assert_eq!(tail.len(), 20);
    }

    #[test]
    fn test_pagination_applies_after_filtering() {
        let store = seeded();
        let filter = MetricsFilter {
            channel: "google_ads".to_string(),
            offset: 1,
            limit: 5,
            ..Default::default()
        };
        let rows = store.query_by_channel(&filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2023-02-01");
    }
}
