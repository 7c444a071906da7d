//! Ingestion entry point
//!
//! One run fetches the ads payload, then the CRM payload, decodes both,
//! transforms them and appends the rows to the store as a single batch.
//! A fetch or decode failure aborts the run before anything is stored.

use std::sync::Arc;

use chrono::NaiveDate;
use metrics_store::MetricsStore;
use serde::Serialize;
use tracing::{info, warn};
use types::errors::{DecodeError, IngestError, SourceKind};
use types::ids::BatchId;

use crate::decode::{decode_ads, decode_opportunities};
use crate::fetch::Fetcher;
use crate::transform::Transformer;

/// Upstream endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub ads: String,
    pub crm: String,
}

/// Outcome of one successful ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub batch_id: BatchId,
    /// Rows appended to the store.
    pub count: usize,
}

/// Runs fetch → decode → transform → append.
pub struct Ingestor {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn MetricsStore>,
    transformer: Transformer,
    urls: SourceUrls,
}

impl Ingestor {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<dyn MetricsStore>, urls: SourceUrls) -> Self {
        info!(ads_url = %urls.ads, crm_url = %urls.crm, "Ingestor initialized");
        Self {
            fetcher,
            store,
            transformer: Transformer::new(),
            urls,
        }
    }

    /// Ingest one batch; `since` bounds the records kept, `None` keeps all.
    pub async fn run(&self, since: Option<NaiveDate>) -> Result<IngestReport, IngestError> {
        let batch_id = BatchId::new();
        info!(%batch_id, since = ?since, "Starting ingestion");

        let ads_bytes = self.fetch(SourceKind::Ads, &self.urls.ads).await?;
        let ads = or_empty(decode_ads(&ads_bytes))?;
        info!(%batch_id, records = ads.len(), "Extracted ads performance records");

        let crm_bytes = self.fetch(SourceKind::Crm, &self.urls.crm).await?;
        let crm = or_empty(decode_opportunities(&crm_bytes))?;
        info!(%batch_id, records = crm.len(), "Extracted CRM opportunities");

        let rows = self.transformer.transform(&ads, &crm, since);
        let count = rows.len();
        self.store.save_metrics(rows);

        info!(%batch_id, count, total_rows = self.store.len(), "Ingestion completed");
        Ok(IngestReport { batch_id, count })
    }

    async fn fetch(&self, origin: SourceKind, url: &str) -> Result<Vec<u8>, IngestError> {
        self.fetcher
            .fetch(url)
            .await
            .map_err(|error| IngestError::Fetch { origin, error })
    }
}

/// A payload without its record array counts as an empty record list.
fn or_empty<T>(decoded: Result<Vec<T>, DecodeError>) -> Result<Vec<T>, DecodeError> {
    match decoded {
        Err(err) if err.is_missing_envelope() => {
            warn!(source = %err.origin, "Payload has no record envelope; treating as empty");
            Ok(Vec::new())
        }
        other => other,
    }
}
