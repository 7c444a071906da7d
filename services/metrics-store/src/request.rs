//! Query request shaping
//!
//! Turns raw query-string parameters into a [`MetricsFilter`]. Nothing here
//! rejects input: malformed `limit` / `offset` values stay at zero and are
//! normalized by the store, and date strings pass through untouched.

use std::collections::HashMap;

use crate::filter::MetricsFilter;

impl MetricsFilter {
    /// Shape parameters for the by-channel query.
    pub fn channel_from_params(params: &HashMap<String, String>) -> Self {
        Self {
            channel: text(params, "channel"),
            ..Self::common(params)
        }
    }

    /// Shape parameters for the by-funnel query.
    pub fn funnel_from_params(params: &HashMap<String, String>) -> Self {
        Self {
            utm_campaign: text(params, "utm_campaign"),
            ..Self::common(params)
        }
    }

    fn common(params: &HashMap<String, String>) -> Self {
        Self {
            from: text(params, "from"),
            to: text(params, "to"),
            limit: number(params, "limit"),
            offset: number(params, "offset"),
            ..Self::default()
        }
    }
}

fn text(params: &HashMap<String, String>, key: &str) -> String {
    params.get(key).cloned().unwrap_or_default()
}

fn number(params: &HashMap<String, String>, key: &str) -> i64 {
    params
        .get(key)
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0)
}
