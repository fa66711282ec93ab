//! Vestfolio Core - equity grant lifecycle tracking and tax computation.
//!
//! This crate owns the grant → vest → sale entity graph and derives the
//! taxes and gains owed at each stage under a July-to-June financial-year
//! regime. It is presentation-agnostic: form, table, and chart collaborators
//! mutate the store through its typed API, run reconciliation before any
//! read, and consume the reporting views as flat rows.

pub mod constants;
pub mod errors;
pub mod grants;
pub mod reconciliation;
pub mod reports;
pub mod serde_io;
pub mod taxes;

pub use errors::{Error, Result, ValidationError};
pub use grants::*;
pub use reconciliation::*;
pub use reports::*;
