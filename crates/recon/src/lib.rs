//! `phisherman-recon` — phishing-campaign reconciliation engine.
//!
//! Pure engine crate: receives pre-decoded tables, returns matched,
//! consolidated, and summarized results. No file or network IO.

pub mod config;
pub mod consolidate;
pub mod error;
pub mod importer;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod resolver;
pub mod roster;
pub mod session;

pub use config::EngineConfig;
pub use error::EngineError;
pub use model::{Report, Table};
pub use roster::RosterTable;
pub use session::{Session, SessionPhase};
