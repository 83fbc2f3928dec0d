//! JSON export of a report.
//!
//! Output is UTF-8 with non-ASCII characters written as-is, keys in report
//! order, and four-space indentation.

use crate::error::{ReportError, Result};
use crate::report::Report;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Renders a report as pretty-printed JSON text.
pub fn render_json(report: &Report) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    report
        .serialize(&mut serializer)
        .map_err(|e| ReportError::export(format!("Failed to serialize report: {e}")))?;

    String::from_utf8(buf)
        .map_err(|e| ReportError::internal(format!("Serialized report is not UTF-8: {e}")))
}

/// Writes a report to `path`, replacing any existing file.
pub fn save_to_json(report: &Report, path: &Path) -> Result<()> {
    let json = render_json(report)?;

    fs::write(path, json)
        .map_err(|e| ReportError::export(format!("Failed to write {}: {e}", path.display())))?;

    info!("Report saved to {}", path.display());
    Ok(())
}
