//! Driver for Morpion Solitaire searches: configuration, the outer
//! re-anchoring loop, and run reports.

pub mod config;
pub mod error;
pub mod report;
pub mod session;

pub use config::{Algorithm, RunConfig};
pub use error::RunError;
pub use report::RunReport;
pub use session::{RunOutcome, Session, run};
