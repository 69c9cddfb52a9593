//! Catalog-driven reconciliation and structural auditing of tours.
//!
//! Everything here is generic over [`tourseed_core::store::TourStore`] and
//! runs strictly sequentially: each store call completes before the next one
//! is issued, and tours are processed one at a time.

pub mod audit;
pub mod error;
pub mod outcome;
pub mod rebuild;
pub mod reconcile;
pub mod resolve;

pub use audit::{AuditOptions, AuditReport, audit};
pub use error::{Error, Result};
pub use outcome::{ReconcileReport, TourOutcome};
pub use reconcile::{Reconciler, reconcile};
