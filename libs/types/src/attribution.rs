//! Attribution key used to join ad spend to CRM opportunities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel substituted for any missing attribution component.
pub const UNKNOWN: &str = "unknown";

/// The (campaign, source, medium) triple.
///
/// Equality is exact string equality of all three components; no
/// case-folding or trimming is applied. Values built through
/// [`AttributionKey::normalized`] never hold an empty component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributionKey {
    #[serde(rename = "utm_campaign")]
    pub campaign: String,
    #[serde(rename = "utm_source")]
    pub source: String,
    #[serde(rename = "utm_medium")]
    pub medium: String,
}

impl AttributionKey {
    /// Build a key, replacing each empty component with [`UNKNOWN`].
    pub fn normalized(campaign: &str, source: &str, medium: &str) -> Self {
        Self {
            campaign: or_unknown(campaign),
            source: or_unknown(source),
            medium: or_unknown(medium),
        }
    }

    /// Re-apply normalization. A normalized key is returned unchanged.
    pub fn renormalized(&self) -> Self {
        Self::normalized(&self.campaign, &self.source, &self.medium)
    }
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for AttributionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.campaign, self.source, self.medium)
    }
}
