//! Presentation model built from a ballot and its validation report.
//! Pure and offline: renderers only read this model, they never re-validate.

use serde::Serialize;

use vs_core::Ballot;
use vs_pipeline::{BallotSummary, ValidationReport};
use vs_rules::Severity;

use crate::labels::{self, Label};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub ballot_title: String,
    pub language: String,
    pub status: Status,
    pub summary: BallotSummary,
    pub sections: Vec<IssueSection>,
    pub preview: Vec<ContestPreview>,
    pub integrity: Integrity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub is_valid: bool,
    pub headline: String,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSection {
    pub severity: Severity,
    pub heading: &'static str,
    pub issues: Vec<IssueRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssueRow {
    pub id: &'static str,
    pub message: String,
    pub suggestion: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestPreview {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: &'static str,
    pub vote_for: &'static str,
    pub candidates: Vec<CandidatePreview>,
    pub allow_write_in: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidatePreview {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Integrity {
    pub revision: u64,
    pub last_checked: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

fn heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Errors",
        Severity::Warning => "Warnings",
        Severity::Suggestion => "Suggestions",
    }
}

fn status(report: &ValidationReport) -> Status {
    if report.is_valid() {
        Status {
            is_valid: true,
            headline: "Ballot is Valid".into(),
            detail: "Your ballot passes all validation checks and is ready for deployment".into(),
        }
    } else {
        Status {
            is_valid: false,
            headline: "Validation Issues Found".into(),
            detail: format!(
                "{} errors, {} warnings, {} suggestions",
                report.errors().len(),
                report.warnings().len(),
                report.suggestions().len()
            ),
        }
    }
}

/// Assemble the model. `fingerprint` is the ballot content hash when the
/// caller has one (the CLI computes it through `vs_io`).
pub fn build_model(ballot: &Ballot, report: &ValidationReport, fingerprint: Option<String>) -> ReportModel {
    let settings = ballot.settings();
    let lang = settings.language.as_str();

    let sections = [Severity::Error, Severity::Warning, Severity::Suggestion]
        .into_iter()
        .map(|severity| IssueSection {
            severity,
            heading: heading(severity),
            issues: report
                .issues(severity)
                .iter()
                .map(|i| IssueRow {
                    id: i.id.key(),
                    message: i.message.clone(),
                    suggestion: i.suggestion.clone(),
                })
                .collect(),
        })
        .collect();

    let preview = ballot
        .contests()
        .iter()
        .map(|c| ContestPreview {
            id: c.id.to_string(),
            title: c.title.clone(),
            description: c.description.clone(),
            kind: c.kind.label(),
            vote_for: labels::text(lang, Label::VoteFor),
            candidates: c
                .candidates
                .iter()
                .map(|k| CandidatePreview {
                    name: k.name.clone(),
                    party: k.party.clone(),
                    description: k.description.clone(),
                })
                .collect(),
            allow_write_in: c.allow_write_in,
        })
        .collect();

    ReportModel {
        ballot_title: labels::ballot_title(lang, &settings.title).to_string(),
        language: settings.language.clone(),
        status: status(report),
        summary: BallotSummary::of(ballot),
        sections,
        preview,
        integrity: Integrity {
            revision: report.revision(),
            last_checked: report.last_checked().to_rfc3339(),
            fingerprint,
        },
    }
}
