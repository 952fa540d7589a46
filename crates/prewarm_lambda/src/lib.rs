//! AWS-oriented adapters and the reconciliation handler for replica prewarming.
//!
//! This crate owns runtime integration details (Lambda handler, RDS and
//! Secrets Manager clients, the Postgres data plane) behind capability traits
//! so the pipeline can run against recording fakes in tests. Domain rules live
//! in `prewarm_core`.

pub mod adapters;
pub mod error;
pub mod handlers;
pub mod telemetry;
