//! Ingestion pipeline
//!
//! Pulls the ads and CRM payloads, decodes them into typed records, joins
//! them on attribution key and appends the derived rows to a metrics store.
//!
//! # Architecture
//!
//! ```text
//!  ads source        crm source
//!      │                 │
//!  ┌───▼───┐         ┌───▼───┐
//!  │ fetch │         │ fetch │   ← bounded retries, exponential backoff
//!  └───┬───┘         └───┬───┘
//!  ┌───▼────┐        ┌───▼────┐
//!  │ decode │        │ decode │  ← strict envelope deserialization
//!  └───┬────┘        └───┬────┘
//!      └───────┬─────────┘
//!         ┌────▼──────┐
//!         │ transform │          ← clean, group, join, derive ratios
//!         └────┬──────┘
//!         ┌────▼──────┐
//!         │   store   │          ← one atomic append per batch
//!         └───────────┘
//! ```
//!
//! Decoding and transformation are pure; the fetch step is the only one
//! that waits on I/O.

pub mod decode;
pub mod fetch;
pub mod ingestion;
pub mod transform;

pub use fetch::{FetchConfig, Fetcher, HttpFetcher};
pub use ingestion::{IngestReport, Ingestor, SourceUrls};
pub use transform::Transformer;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
