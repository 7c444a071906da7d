//! Metrics Store
//!
//! Append-only, in-memory sequence of derived metric rows with two read
//! queries (by channel, by funnel campaign). Both queries share one filter
//! type with an inclusive date range and offset/limit pagination.
//!
//! # Architecture
//!
//! ```text
//!  query params (untyped)
//!        │
//!   ┌────▼────┐
//!   │ request │  ← lenient shaping into MetricsFilter
//!   └────┬────┘
//!        │
//!   ┌────▼────┐      ┌────────────┐
//!   │ filter  │◄─────┤ MemoryStore│ ← save_metrics appends whole batches
//!   └────┬────┘      └────────────┘
//!        │
//!     page of rows
//! ```
//!
//! The store keeps every row for the life of the process. There is no
//! eviction and no durability.

pub mod filter;
pub mod request;
pub mod store;

pub use filter::{MetricsFilter, DEFAULT_LIMIT};
pub use store::{MemoryStore, MetricsStore};

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
