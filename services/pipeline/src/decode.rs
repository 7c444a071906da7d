//! Payload decoding
//!
//! Strict schema deserialization of the two upstream envelopes:
//!
//! ```text
//! ads: { "external": { "ads": { "performance":   [ ... ] } } }
//! crm: { "external": { "crm": { "opportunities": [ ... ] } } }
//! ```
//!
//! Any level that is present with the wrong shape, or any record field of
//! the wrong type, fails the whole payload. A level that is absent or
//! `null` yields [`DecodeErrorKind::MissingEnvelope`], which the ingestion
//! boundary treats as an empty record list.
//!
//! [`DecodeErrorKind::MissingEnvelope`]: types::errors::DecodeErrorKind::MissingEnvelope

use serde::Deserialize;
use types::ads::AdRecord;
use types::crm::OpportunityRecord;
use types::errors::{DecodeError, SourceKind};

pub const ADS_ENVELOPE_PATH: &str = "external.ads.performance";
pub const CRM_ENVELOPE_PATH: &str = "external.crm.opportunities";

// ── Envelopes ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AdsEnvelope {
    external: Option<AdsExternal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AdsExternal {
    ads: Option<AdsSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AdsSection {
    performance: Option<Vec<AdRecord>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrmEnvelope {
    external: Option<CrmExternal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrmExternal {
    crm: Option<CrmSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrmSection {
    opportunities: Option<Vec<OpportunityRecord>>,
}

// ── Decoders ────────────────────────────────────────────────────────

/// Decode an ads payload into its performance records.
pub fn decode_ads(bytes: &[u8]) -> Result<Vec<AdRecord>, DecodeError> {
    let envelope: AdsEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| DecodeError::malformed(SourceKind::Ads, e))?;

    envelope
        .external
        .and_then(|external| external.ads)
        .and_then(|ads| ads.performance)
        .ok_or_else(|| DecodeError::missing_envelope(SourceKind::Ads, ADS_ENVELOPE_PATH))
}

/// Decode a CRM payload into its opportunity records.
pub fn decode_opportunities(bytes: &[u8]) -> Result<Vec<OpportunityRecord>, DecodeError> {
    let envelope: CrmEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| DecodeError::malformed(SourceKind::Crm, e))?;

    envelope
        .external
        .and_then(|external| external.crm)
        .and_then(|crm| crm.opportunities)
        .ok_or_else(|| DecodeError::missing_envelope(SourceKind::Crm, CRM_ENVELOPE_PATH))
}
