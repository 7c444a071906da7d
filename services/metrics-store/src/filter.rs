//! Query filter, date-range evaluation and pagination

use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use types::calendar::parse_day;
use types::metric::MetricRow;

/// Page size used when the caller asks for `limit <= 0`.
pub const DEFAULT_LIMIT: usize = 50;

/// Filter and pagination parameters for a metrics query.
///
/// Empty strings mean "no constraint". Dates are kept as the caller sent
/// them; an unparsable bound is ignored when the filter is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsFilter {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from: String,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to: String,
    /// Exact channel match (channel query only).
    pub channel: String,
    /// Exact campaign attribution match (funnel query only).
    pub utm_campaign: String,
    pub limit: i64,
    pub offset: i64,
}

/// Parsed date bounds of one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Parse both bounds; missing or malformed bounds become open.
    pub fn from_bounds(from: &str, to: &str) -> Self {
        Self {
            from: parse_bound(from),
            to: parse_bound(to),
        }
    }

    /// Whether a row date falls inside the range, both ends inclusive.
    ///
    /// A row whose stored date does not parse is never inside.
    pub fn contains(&self, row_date: &str) -> bool {
        let Some(day) = parse_day(row_date) else {
            return false;
        };
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }
}

fn parse_bound(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        None
    } else {
        parse_day(value)
    }
}

impl MetricsFilter {
    pub fn date_range(&self) -> DateRange {
        DateRange::from_bounds(&self.from, &self.to)
    }

    /// Page size after normalization (`limit <= 0` becomes the default).
    pub fn effective_limit(&self) -> usize {
        if self.limit <= 0 {
            DEFAULT_LIMIT
        } else {
            usize::try_from(self.limit).unwrap_or(usize::MAX)
        }
    }

    /// Offset after normalization (negative becomes zero).
    pub fn effective_offset(&self) -> usize {
        if self.offset < 0 {
            0
        } else {
            usize::try_from(self.offset).unwrap_or(usize::MAX)
        }
    }

    /// Index range of the page within `len` filtered rows, clamped.
    pub fn page_bounds(&self, len: usize) -> Range<usize> {
        let start = self.effective_offset().min(len);
        let end = start.saturating_add(self.effective_limit()).min(len);
        start..end
    }

    pub fn matches_channel(&self, row: &MetricRow) -> bool {
        self.channel.is_empty() || row.channel == self.channel
    }

    pub fn matches_campaign(&self, row: &MetricRow) -> bool {
        self.utm_campaign.is_empty() || row.key.campaign == self.utm_campaign
    }
}
