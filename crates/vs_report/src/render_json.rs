use crate::{ReportError, ReportModel};

/// Pretty JSON; field order follows the model's struct layout.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(model)?)
}
