//! Rule ids, severities, texts, and the canonical evaluation order.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use vs_core::Ballot;

use crate::params::RuleParams;
use crate::predicates as p;

/// Severity class of a rule. Only `Error` affects ballot validity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RuleId {
    BallotTitle,
    ElectionDate,
    NoContests,
    EmptyContests,
    MissingCandidateNames,
    SingleCandidateContest,
    LongContestTitles,
    MissingCandidateParties,
    NoDescriptions,
    CandidatePhotos,
    AccessibilityCheck,
}

/// Canonical evaluation order. Reports list issues in this order.
pub const CATALOGUE: [RuleId; 11] = [
    RuleId::BallotTitle,
    RuleId::ElectionDate,
    RuleId::NoContests,
    RuleId::EmptyContests,
    RuleId::MissingCandidateNames,
    RuleId::SingleCandidateContest,
    RuleId::LongContestTitles,
    RuleId::MissingCandidateParties,
    RuleId::NoDescriptions,
    RuleId::CandidatePhotos,
    RuleId::AccessibilityCheck,
];

impl RuleId {
    /// Stable string key, e.g. `"single-candidate-contest"`.
    pub fn key(self) -> &'static str {
        match self {
            RuleId::BallotTitle => "ballot-title",
            RuleId::ElectionDate => "election-date",
            RuleId::NoContests => "no-contests",
            RuleId::EmptyContests => "empty-contests",
            RuleId::MissingCandidateNames => "missing-candidate-names",
            RuleId::SingleCandidateContest => "single-candidate-contest",
            RuleId::LongContestTitles => "long-contest-titles",
            RuleId::MissingCandidateParties => "missing-candidate-parties",
            RuleId::NoDescriptions => "no-descriptions",
            RuleId::CandidatePhotos => "candidate-photos",
            RuleId::AccessibilityCheck => "accessibility-check",
        }
    }

    pub fn from_key(key: &str) -> Option<RuleId> {
        CATALOGUE.into_iter().find(|r| r.key() == key)
    }

    pub fn severity(self) -> Severity {
        use RuleId::*;
        match self {
            BallotTitle | ElectionDate | NoContests | EmptyContests | MissingCandidateNames => {
                Severity::Error
            }
            SingleCandidateContest | LongContestTitles | MissingCandidateParties => Severity::Warning,
            NoDescriptions | CandidatePhotos | AccessibilityCheck => Severity::Suggestion,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RuleId::BallotTitle => "Ballot title is required",
            RuleId::ElectionDate => "Election date is required",
            RuleId::NoContests => "At least one contest is required",
            RuleId::EmptyContests => "All contests must have at least one candidate",
            RuleId::MissingCandidateNames => "All candidates must have names",
            RuleId::SingleCandidateContest => {
                "Some contests have only one candidate without write-in option"
            }
            RuleId::LongContestTitles => "Some contest titles are very long",
            RuleId::MissingCandidateParties => "Some candidates are missing party affiliations",
            RuleId::NoDescriptions => {
                "Contest descriptions help voters understand what they're voting for"
            }
            RuleId::CandidatePhotos => "Candidate photos improve voter recognition",
            RuleId::AccessibilityCheck => "Accessibility compliance review recommended",
        }
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            RuleId::BallotTitle => {
                "Add a descriptive title for your ballot (e.g., \"2024 General Election\")"
            }
            RuleId::ElectionDate => "Set the election date in ballot settings",
            RuleId::NoContests => "Add contests to your ballot using the Ballot Builder",
            RuleId::EmptyContests => "Add candidates to all contests or remove empty contests",
            RuleId::MissingCandidateNames => "Ensure all candidates have complete name information",
            RuleId::SingleCandidateContest => {
                "Consider enabling write-in candidates or adding more candidates"
            }
            RuleId::LongContestTitles => "Keep contest titles concise for better readability",
            RuleId::MissingCandidateParties => {
                "Add party information for all candidates or mark as independent"
            }
            RuleId::NoDescriptions => "Add brief descriptions to explain each contest",
            RuleId::CandidatePhotos => "Consider adding photos for all candidates",
            RuleId::AccessibilityCheck => {
                "Review ballot for screen reader compatibility and color contrast"
            }
        }
    }

    /// Evaluate this rule against a ballot snapshot. `true` = flag it.
    pub fn is_flagged(self, ballot: &Ballot, params: &RuleParams) -> bool {
        match self {
            RuleId::BallotTitle => p::ballot_title_missing(ballot),
            RuleId::ElectionDate => p::election_date_missing(ballot),
            RuleId::NoContests => p::no_contests(ballot),
            RuleId::EmptyContests => p::any_empty_contest(ballot),
            RuleId::MissingCandidateNames => p::any_candidate_name_missing(ballot),
            RuleId::SingleCandidateContest => p::any_single_candidate_contest(ballot),
            RuleId::LongContestTitles => p::any_long_contest_title(ballot, params),
            RuleId::MissingCandidateParties => p::any_candidate_party_missing(ballot),
            RuleId::NoDescriptions => p::any_contest_description_missing(ballot),
            RuleId::CandidatePhotos => p::any_candidate_photo_missing(ballot),
            // Always recommended, whatever the ballot looks like.
            RuleId::AccessibilityCheck => true,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
