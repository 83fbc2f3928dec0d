//! fitclub-report - runs the fitness-club query catalog and exports JSON.
//!
//! This library exposes the core modules for the binary and for integration tests.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod report;
pub mod runner;
pub mod safety;

pub use error::{ReportError, Result};
pub use runner::QueryRunner;
