//! vs_report: offline report model and renderers.
//!
//! `build_model` turns a ballot plus its `ValidationReport` into a
//! [`ReportModel`]; the renderers (JSON, plain text, HTML) only read that
//! model. No I/O here: callers decide where the bytes go.

#![deny(unsafe_code)]

pub mod labels;
pub mod model;
pub mod render_html;
pub mod render_json;
pub mod render_text;

pub use labels::Label;
pub use model::{build_model, ReportModel};
pub use render_html::render_html;
pub use render_json::render_json;
pub use render_text::render_text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("formatting failed")]
    Fmt(#[from] std::fmt::Error),
}

/// Output format selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
    Html,
}

pub fn render(model: &ReportModel, format: Format) -> Result<String, ReportError> {
    match format {
        Format::Text => render_text(model),
        Format::Json => render_json(model),
        Format::Html => render_html(model),
    }
}
