//! One full, exhaustive pass of the rule catalogue over a ballot snapshot.
//! Deterministic: the same snapshot always yields the same issues in the same
//! order; only `last_checked` differs between runs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vs_core::Ballot;
use vs_rules::{RuleId, RuleParams, Severity, CATALOGUE};

/// One finding. `id` is the rule key; at most one issue per rule per pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub id: RuleId,
    pub message: String,
    pub suggestion: String,
}

impl ValidationIssue {
    fn from_rule(rule: RuleId) -> Self {
        Self {
            id: rule,
            message: rule.message().to_string(),
            suggestion: rule.suggestion().to_string(),
        }
    }
}

/// Result of one evaluation. Built only by [`evaluate_at`], so `is_valid`
/// always equals `errors.is_empty()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    suggestions: Vec<ValidationIssue>,
    is_valid: bool,
    last_checked: DateTime<Utc>,
    /// Ballot revision this report was computed against.
    revision: u64,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    pub fn suggestions(&self) -> &[ValidationIssue] {
        &self.suggestions
    }

    pub fn issues(&self, severity: Severity) -> &[ValidationIssue] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Suggestion => &self.suggestions,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn last_checked(&self) -> DateTime<Utc> {
        self.last_checked
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Every issue, errors first, then warnings, then suggestions.
    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }

    pub fn contains(&self, rule: RuleId) -> bool {
        self.issues(rule.severity()).iter().any(|i| i.id == rule)
    }

    /// Keys of the flagged rules for one severity, in catalogue order.
    pub fn keys(&self, severity: Severity) -> Vec<&'static str> {
        self.issues(severity).iter().map(|i| i.id.key()).collect()
    }

    /// Equal findings, ignoring when the evaluation happened.
    pub fn same_findings(&self, other: &ValidationReport) -> bool {
        self.errors == other.errors
            && self.warnings == other.warnings
            && self.suggestions == other.suggestions
    }
}

/// Evaluate every rule against `ballot`, stamped with the current time.
pub fn evaluate(ballot: &Ballot, params: &RuleParams) -> ValidationReport {
    evaluate_at(ballot, params, Utc::now())
}

/// Evaluate every rule against `ballot`. No short-circuiting: all rules run
/// even after an error has been found.
pub fn evaluate_at(ballot: &Ballot, params: &RuleParams, at: DateTime<Utc>) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    for rule in CATALOGUE {
        if !rule.is_flagged(ballot, params) {
            continue;
        }
        tracing::trace!(rule = rule.key(), severity = %rule.severity(), "rule flagged");
        let issue = ValidationIssue::from_rule(rule);
        match rule.severity() {
            Severity::Error => errors.push(issue),
            Severity::Warning => warnings.push(issue),
            Severity::Suggestion => suggestions.push(issue),
        }
    }

    let is_valid = errors.is_empty();
    tracing::debug!(
        revision = ballot.revision(),
        errors = errors.len(),
        warnings = warnings.len(),
        suggestions = suggestions.len(),
        is_valid,
        "ballot validated"
    );

    ValidationReport {
        errors,
        warnings,
        suggestions,
        is_valid,
        last_checked: at,
        revision: ballot.revision(),
    }
}
