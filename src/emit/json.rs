use crate::report::{CheckReport, OrderReport};

/// Emit an order report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn emit_order_json(report: &OrderReport) -> Result<String, String> {
    serde_json::to_string_pretty(report)
        .map(|s| s + "\n")
        .map_err(|e| format!("json serialization failed: {e}"))
}

/// Emit a check report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn emit_check_json(report: &CheckReport) -> Result<String, String> {
    serde_json::to_string_pretty(report)
        .map(|s| s + "\n")
        .map_err(|e| format!("json serialization failed: {e}"))
}
