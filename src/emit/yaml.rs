use crate::report::{CheckReport, OrderReport};

/// Emit an order report as YAML.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn emit_order_yaml(report: &OrderReport) -> Result<String, String> {
    serde_yaml::to_string(report).map_err(|e| format!("yaml serialization failed: {e}"))
}

/// Emit a check report as YAML.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn emit_check_yaml(report: &CheckReport) -> Result<String, String> {
    serde_yaml::to_string(report).map_err(|e| format!("yaml serialization failed: {e}"))
}
