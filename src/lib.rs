//! Core library for the `stresstea` CLI.
//!
//! A rate-controlled HTTP load generator: paced workers feed a bounded
//! result bus, a single dashboard loop folds results into streaming
//! metrics, and a terminal UI (or a headless logger) presents them. The
//! primary user-facing interface is the `stresstea` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod lifecycle;
pub mod load;
pub mod metrics;
pub mod protocol;
pub mod shutdown;
pub mod system;
pub mod ui;
