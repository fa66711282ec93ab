//! Lazy, idempotent recomputation of cached derived fields.

mod reconciliation_service;


pub use reconciliation_service::{
    ReconciliationIssue, ReconciliationReport, ReconciliationService,
};
