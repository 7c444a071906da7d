//! Fixture payloads served by the mock sources.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

pub fn ads_payload() -> Value {
    json!({
        "external": {
            "ads": {
                "performance": [
                    {
                        "date": "2025-08-01",
                        "campaign_id": "C-1001",
                        "channel": "google_ads",
                        "clicks": 1200,
                        "impressions": 45000,
                        "cost": 350.75,
                        "utm_campaign": "back_to_school",
                        "utm_source": "google",
                        "utm_medium": "cpc"
                    }
                ]
            }
        }
    })
}

/// `created_at` is `now` at second precision.
pub fn crm_payload(now: DateTime<Utc>) -> Value {
    json!({
        "external": {
            "crm": {
                "opportunities": [
                    {
                        "opportunity_id": "O-9001",
                        "contact_email": "ana@example.com",
                        "stage": "closed_won",
                        "amount": 5000.0,
                        "created_at": now.to_rfc3339_opts(SecondsFormat::Secs, true),
                        "utm_campaign": "back_to_school",
                        "utm_source": "google",
                        "utm_medium": "cpc"
                    }
                ]
            }
        }
    })
}
