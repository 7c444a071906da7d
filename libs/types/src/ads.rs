//! Advertising performance records
//!
//! Mirrors one element of `external.ads.performance` in the ads payload.

use crate::attribution::AttributionKey;
use crate::calendar::parse_day;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of performance for one campaign on one channel.
///
/// Missing fields decode to empty strings / zero; validation happens in
/// [`AdRecord::validate`], not at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdRecord {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub campaign_id: String,
    pub channel: String,
    pub clicks: i64,
    pub impressions: i64,
    pub cost: f64,
    pub utm_campaign: String,
    pub utm_source: String,
    pub utm_medium: String,
}

/// Why an ad record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdRejection {
    InvalidDate,
    MissingCampaignId,
    MissingChannel,
}

impl AdRecord {
    /// Parse the date and check required fields.
    ///
    /// Returns the parsed calendar day of a valid record.
    pub fn validate(&self) -> Result<NaiveDate, AdRejection> {
        let day = parse_day(&self.date).ok_or(AdRejection::InvalidDate)?;
        if self.campaign_id.is_empty() {
            return Err(AdRejection::MissingCampaignId);
        }
        if self.channel.is_empty() {
            return Err(AdRejection::MissingChannel);
        }
        Ok(day)
    }

    /// Attribution key with missing components set to `unknown`.
    pub fn attribution_key(&self) -> AttributionKey {
        AttributionKey::normalized(&self.utm_campaign, &self.utm_source, &self.utm_medium)
    }
}
