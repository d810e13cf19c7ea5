//! Ballot testing simulator.
//!
//! `simulate` produces a voter-experience estimate for one profile. All
//! variation is drawn from a seeded [`SimRng`], so a seed fully determines
//! the result. `VoterSelections` models what a voter has marked so far and
//! enforces the per-contest-type selection rules.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::Serialize;

use vs_core::rng::SimRng;
use vs_core::{CandidateId, Contest, ContestId, ContestType, CoreError};

pub const SIMULATION_STEPS: [&str; 5] = [
    "Authentication",
    "Ballot Instructions",
    "Contest Voting",
    "Review Selections",
    "Submit Ballot",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoterProfile {
    #[default]
    TechSavvy,
    Elderly,
    FirstTime,
    MobileUser,
}

impl VoterProfile {
    pub const ALL: [VoterProfile; 4] = [
        VoterProfile::TechSavvy,
        VoterProfile::Elderly,
        VoterProfile::FirstTime,
        VoterProfile::MobileUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VoterProfile::TechSavvy => "tech-savvy",
            VoterProfile::Elderly => "elderly",
            VoterProfile::FirstTime => "first-time",
            VoterProfile::MobileUser => "mobile-user",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VoterProfile::TechSavvy => "Tech-Savvy Voter",
            VoterProfile::Elderly => "Elderly Voter",
            VoterProfile::FirstTime => "First-Time Voter",
            VoterProfile::MobileUser => "Mobile User",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VoterProfile::TechSavvy => "Comfortable with technology, quick navigation",
            VoterProfile::Elderly => "May need larger text and slower interaction",
            VoterProfile::FirstTime => "New to voting process, needs guidance",
            VoterProfile::MobileUser => "Voting on smartphone or tablet",
        }
    }

    fn base_minutes(self) -> u32 {
        match self {
            VoterProfile::Elderly => 8,
            VoterProfile::FirstTime => 6,
            _ => 4,
        }
    }

    fn success_rate_pct(self) -> u8 {
        match self {
            VoterProfile::Elderly => 92,
            _ => 98,
        }
    }

    fn usability_score(self) -> u8 {
        match self {
            VoterProfile::Elderly => 85,
            VoterProfile::FirstTime => 88,
            _ => 95,
        }
    }
}

impl fmt::Display for VoterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoterProfile {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoterProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(CoreError::DomainOutOfRange("voter profile"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimIssue {
    pub severity: IssueSeverity,
    pub message: &'static str,
}

const fn issue(severity: IssueSeverity, message: &'static str) -> SimIssue {
    SimIssue { severity, message }
}

const BASE_ISSUES: [SimIssue; 4] = [
    issue(IssueSeverity::Low, "Some contest titles are lengthy for mobile view"),
    issue(IssueSeverity::Medium, "Candidate photos take time to load"),
    issue(IssueSeverity::Low, "Help text could be more prominent"),
    issue(IssueSeverity::Medium, "Submit button requires double confirmation"),
];

const RECOMMENDATIONS: [&str; 4] = [
    "Consider adding progress indicators",
    "Implement auto-save functionality",
    "Add keyboard navigation support",
    "Include audio instructions option",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub profile: VoterProfile,
    pub seed: u64,
    pub completion_minutes: u32,
    pub success_rate_pct: u8,
    pub usability_score: u8,
    pub issues: Vec<SimIssue>,
    pub recommendations: Vec<&'static str>,
}

/// Candidate issue list for a profile: the shared findings followed by the
/// profile-specific ones. Results report a prefix of this list.
pub fn issue_pool(profile: VoterProfile) -> Vec<SimIssue> {
    let mut pool = BASE_ISSUES.to_vec();
    match profile {
        VoterProfile::Elderly => {
            pool.push(issue(IssueSeverity::Medium, "Font size may be too small for some users"))
        }
        VoterProfile::MobileUser => pool.push(issue(IssueSeverity::Low, "Touch targets could be larger")),
        _ => {}
    }
    pool
}

/// Run one simulated voting session. Draw order is fixed (minutes, issue
/// count, recommendation count) so results are stable per seed.
pub fn simulate(profile: VoterProfile, seed: u64) -> SimulationResult {
    let mut rng = SimRng::from_seed_u64(seed);
    let completion_minutes = profile.base_minutes() + rng.gen_inclusive(0, 2) as u32;

    let mut issues = issue_pool(profile);
    issues.truncate(rng.gen_inclusive(1, 3) as usize);

    let n_recs = rng.gen_inclusive(2, 3) as usize;
    let recommendations = RECOMMENDATIONS[..n_recs].to_vec();

    tracing::debug!(
        profile = profile.as_str(),
        seed,
        completion_minutes,
        issues = issues.len(),
        words = rng.words_consumed() as u64,
        "simulation finished"
    );

    SimulationResult {
        profile,
        seed,
        completion_minutes,
        success_rate_pct: profile.success_rate_pct(),
        usability_score: profile.usability_score(),
        issues,
        recommendations,
    }
}

/* ------------------------------- Voter selections ------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mark {
    Candidate(CandidateId),
    WriteIn(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("candidate {candidate} is not in contest {contest}")]
    UnknownCandidate { contest: ContestId, candidate: CandidateId },
    #[error("contest {0} does not accept write-in candidates")]
    WriteInNotAllowed(ContestId),
    #[error("write-in name is empty")]
    BlankWriteIn,
    #[error("contest {contest} allows at most {max} selections")]
    LimitReached { contest: ContestId, max: u32 },
}

/// Marks per contest, in the order the voter made them. For ranked-choice
/// contests that order is the ranking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VoterSelections {
    marks: BTreeMap<ContestId, Vec<Mark>>,
}

impl VoterSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks(&self, contest: &ContestId) -> &[Mark] {
        self.marks.get(contest).map_or(&[], Vec::as_slice)
    }

    /// Contests with at least one mark.
    pub fn marked_contests(&self) -> usize {
        self.marks.values().filter(|m| !m.is_empty()).count()
    }

    /// Toggle a listed candidate.
    pub fn select(&mut self, contest: &Contest, candidate: &CandidateId) -> Result<(), SelectionError> {
        if contest.candidate(candidate).is_none() {
            return Err(SelectionError::UnknownCandidate {
                contest: contest.id.clone(),
                candidate: candidate.clone(),
            });
        }
        self.mark(contest, Mark::Candidate(candidate.clone()))
    }

    /// Toggle a write-in name; only for contests that allow write-ins.
    pub fn write_in(&mut self, contest: &Contest, name: &str) -> Result<(), SelectionError> {
        if !contest.allow_write_in {
            return Err(SelectionError::WriteInNotAllowed(contest.id.clone()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SelectionError::BlankWriteIn);
        }
        self.mark(contest, Mark::WriteIn(name.to_string()))
    }

    pub fn clear(&mut self, contest: &ContestId) {
        self.marks.remove(contest);
    }

    fn mark(&mut self, contest: &Contest, mark: Mark) -> Result<(), SelectionError> {
        let marks = self.marks.entry(contest.id.clone()).or_default();
        if contest.kind == ContestType::SingleChoice {
            marks.clear();
            marks.push(mark);
            return Ok(());
        }
        if let Some(pos) = marks.iter().position(|m| *m == mark) {
            marks.remove(pos);
            return Ok(());
        }
        if contest.kind == ContestType::MultiChoice && marks.len() >= contest.max_selections as usize {
            return Err(SelectionError::LimitReached {
                contest: contest.id.clone(),
                max: contest.max_selections,
            });
        }
        marks.push(mark);
        Ok(())
    }
}
