//! Plain-text rendering for terminals.

use std::fmt::Write as _;

use crate::{ReportError, ReportModel};

pub fn render_text(model: &ReportModel) -> Result<String, ReportError> {
    let mut out = String::with_capacity(1024);
    writeln!(out, "{}", model.ballot_title)?;
    writeln!(out, "{}: {}", model.status.headline, model.status.detail)?;
    writeln!(
        out,
        "Contests: {}  Candidates: {}  Write-in contests: {}",
        model.summary.contests, model.summary.candidates, model.summary.write_in_contests
    )?;

    for section in model.sections.iter().filter(|s| !s.issues.is_empty()) {
        writeln!(out)?;
        writeln!(out, "{} ({})", section.heading, section.issues.len())?;
        for issue in &section.issues {
            writeln!(out, "  [{}] {}", issue.id, issue.message)?;
            writeln!(out, "      -> {}", issue.suggestion)?;
        }
    }

    writeln!(out)?;
    match &model.integrity.fingerprint {
        Some(fp) => writeln!(out, "revision {}  sha256 {}", model.integrity.revision, fp)?,
        None => writeln!(out, "revision {}", model.integrity.revision)?,
    }
    Ok(out)
}
