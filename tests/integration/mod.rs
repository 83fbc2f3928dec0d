//! Integration tests for fitclub-report.

pub mod common;
pub mod export_test;
pub mod sqlite_catalog_test;
