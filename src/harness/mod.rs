//! Execution infrastructure shared by the regression oracle and the fuzz
//! harness: run configuration, the supervised worker pool and failure
//! reports.

pub mod config;
pub mod pool;
pub mod report;

pub use config::HarnessConfig;
pub use pool::{Job, JobOutcome, Supervisor};
pub use report::{Failure, RunReport};
