//! CRM opportunity records
//!
//! Mirrors one element of `external.crm.opportunities` in the CRM payload.

use crate::attribution::AttributionKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stage of a fresh lead that has not progressed.
pub const STAGE_LEAD: &str = "lead";
/// Stage of a won deal; only these contribute revenue.
pub const STAGE_CLOSED_WON: &str = "closed_won";

/// An opportunity (or lead) attributed to a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityRecord {
    pub opportunity_id: String,
    pub contact_email: String,
    /// Free-text pipeline stage.
    pub stage: String,
    pub amount: f64,
    /// RFC 3339 creation timestamp; `None` when absent or null.
    pub created_at: Option<DateTime<Utc>>,
    pub utm_campaign: String,
    pub utm_source: String,
    pub utm_medium: String,
}

/// Why an opportunity record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunityRejection {
    MissingOpportunityId,
    MissingStage,
}

impl OpportunityRecord {
    pub fn validate(&self) -> Result<(), OpportunityRejection> {
        if self.opportunity_id.is_empty() {
            return Err(OpportunityRejection::MissingOpportunityId);
        }
        if self.stage.is_empty() {
            return Err(OpportunityRejection::MissingStage);
        }
        Ok(())
    }

    /// True for every stage other than `lead`.
    pub fn is_opportunity(&self) -> bool {
        self.stage != STAGE_LEAD
    }

    pub fn is_closed_won(&self) -> bool {
        self.stage == STAGE_CLOSED_WON
    }

    /// Whether the record was created strictly before `bound`.
    ///
    /// A record with no timestamp is older than any bound.
    pub fn created_before(&self, bound: DateTime<Utc>) -> bool {
        match self.created_at {
            Some(ts) => ts < bound,
            None => true,
        }
    }

    /// Attribution key with missing components set to `unknown`.
    pub fn attribution_key(&self) -> AttributionKey {
        AttributionKey::normalized(&self.utm_campaign, &self.utm_source, &self.utm_medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stage_classification() {
        let mut opp = OpportunityRecord {
            opportunity_id: "O-1".to_string(),
            stage: "lead".to_string(),
            ..Default::default()
        };
        assert!(!opp.is_opportunity());
        assert!(!opp.is_closed_won());

        opp.stage = "qualified".to_string();
        assert!(opp.is_opportunity());
        assert!(!opp.is_closed_won());

        opp.stage = "closed_won".to_string();
        assert!(opp.is_opportunity());
        assert!(opp.is_closed_won());
    }

    #[test]
    fn test_validate_required_fields() {
        let mut opp = OpportunityRecord {
            opportunity_id: "O-1".to_string(),
            stage: "lead".to_string(),
            ..Default::default()
        };
        assert!(opp.validate().is_ok());

        opp.stage.clear();
        assert_eq!(opp.validate(), Err(OpportunityRejection::MissingStage));

        opp.opportunity_id.clear();
        assert_eq!(opp.validate(), Err(OpportunityRejection::MissingOpportunityId));
    }

    #[test]
    fn test_created_before_full_precision() {
        let bound = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        let mut opp = OpportunityRecord::default();

        opp.created_at = Some(Utc.with_ymd_and_hms(2023, 1, 14, 23, 59, 59).unwrap());
        assert!(opp.created_before(bound));

        opp.created_at = Some(bound);
        assert!(!opp.created_before(bound));

        opp.created_at = None;
        assert!(opp.created_before(bound));
    }

    #[test]
    fn test_decode_timestamp_with_offset() {
        let opp: OpportunityRecord = serde_json::from_str(
            r#"{"opportunity_id":"O-1","stage":"lead","created_at":"2023-01-15T02:00:00+02:00"}"#,
        )
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(opp.created_at, Some(expected));
    }

    #[test]
    fn test_null_timestamp_is_none() {
        let opp: OpportunityRecord =
            serde_json::from_str(r#"{"opportunity_id":"O-1","created_at":null}"#).unwrap();
        assert!(opp.created_at.is_none());
    }
}
