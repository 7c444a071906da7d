//! Types library for the funnel metrics service
//!
//! Core record definitions shared by the pipeline, the metrics store and
//! the API surface. Wire names follow the upstream ads / CRM payloads and
//! the published metric row shape.
//!
//! # Modules
//! - `ids`: Batch identifiers
//! - `calendar`: Calendar-day parsing and day boundaries
//! - `attribution`: The (campaign, source, medium) join key
//! - `ads`: Advertising performance records
//! - `crm`: CRM opportunity records
//! - `metric`: Derived funnel metric rows and ratio rules
//! - `errors`: Error taxonomy

pub mod ids;
pub mod calendar;
pub mod attribution;
pub mod ads;
pub mod crm;
pub mod metric;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::calendar::*;
    pub use crate::attribution::*;
    pub use crate::ads::*;
    pub use crate::crm::*;
    pub use crate::metric::*;
    pub use crate::errors::*;
}
