//! Domain primitives for replica prewarming.
//!
//! This crate owns the lifecycle-event contract, the relevance filter,
//! cluster topology rules, credential decoding and configuration parsing.
//! It intentionally excludes AWS SDK, Lambda runtime and database driver
//! concerns; those live in `prewarm_lambda`.

pub mod config;
pub mod contract;
pub mod credentials;
pub mod event_filter;
pub mod topology;
