//! Derived funnel metric rows
//!
//! One row per attribution key per ingestion batch. Serialized field names
//! and order are the public row shape served by the read API.

use crate::attribution::AttributionKey;
use serde::{Deserialize, Serialize};

/// Aggregated ads spend joined with CRM outcomes for one attribution key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Date of the first ads record of the group.
    pub date: String,
    /// Channel of the first ads record of the group.
    pub channel: String,
    /// Campaign id of the first ads record of the group.
    pub campaign_id: String,
    #[serde(flatten)]
    pub key: AttributionKey,

    // Ads totals
    pub clicks: i64,
    pub impressions: i64,
    pub cost: f64,

    // CRM totals
    pub leads: u64,
    pub opportunities: u64,
    pub closed_won: u64,
    pub revenue: f64,

    // Derived ratios
    pub cpc: f64,
    pub cpa: f64,
    pub cvr_lead_to_opp: f64,
    pub cvr_opp_to_won: f64,
    pub roas: f64,
}

/// `numerator / denominator`, or `0.0` unless the denominator is positive.
///
/// A quotient that is not finite is also reported as `0.0`.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        0.0
    }
}

/// `total + amount`, clamped to the finite `f64` range.
pub fn add_amount(total: f64, amount: f64) -> f64 {
    let sum = total + amount;
    if sum.is_finite() {
        sum
    } else if sum > 0.0 {
        f64::MAX
    } else if sum < 0.0 {
        f64::MIN
    } else {
        total
    }
}

impl MetricRow {
    /// Row with the representative fields set and all totals at zero.
    pub fn empty(date: &str, channel: &str, campaign_id: &str, key: AttributionKey) -> Self {
        Self {
            date: date.to_string(),
            channel: channel.to_string(),
            campaign_id: campaign_id.to_string(),
            key,
            clicks: 0,
            impressions: 0,
            cost: 0.0,
            leads: 0,
            opportunities: 0,
            closed_won: 0,
            revenue: 0.0,
            cpc: 0.0,
            cpa: 0.0,
            cvr_lead_to_opp: 0.0,
            cvr_opp_to_won: 0.0,
            roas: 0.0,
        }
    }

    /// Recompute the five ratios from the current totals.
    pub fn compute_ratios(&mut self) {
        self.cpc = ratio(self.cost, self.clicks as f64);
        self.cpa = ratio(self.cost, self.leads as f64);
        self.cvr_lead_to_opp = ratio(self.opportunities as f64, self.leads as f64);
        self.cvr_opp_to_won = ratio(self.closed_won as f64, self.opportunities as f64);
        self.roas = ratio(self.revenue, self.cost);
    }
}
