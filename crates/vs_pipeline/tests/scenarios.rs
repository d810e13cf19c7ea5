//! End-to-end validation scenarios over the public pipeline API.

use chrono::NaiveDate;
use vs_core::{Ballot, Candidate, CandidateId, Contest, ContestId, ContestType, SettingsPatch};
use vs_pipeline::{evaluate, BallotSession, BallotSummary, ValidationEngine};
use vs_rules::{RuleId, RuleParams, Severity};

fn cid(s: &str) -> ContestId {
    s.parse().unwrap()
}

fn kid(s: &str) -> CandidateId {
    s.parse().unwrap()
}

fn election_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
}

fn full_candidate(id: &str, name: &str, party: &str) -> Candidate {
    Candidate::new(kid(id), name)
        .with_party(party)
        .with_photo(format!("https://example.org/{id}.jpg"))
}

fn minimal_valid_ballot() -> Ballot {
    let mut b = Ballot::new();
    b.set_settings(SettingsPatch::default().title("2024 General Election").date(election_day()));
    b.add_contest(
        Contest::new(cid("mayor"), "Mayor", ContestType::SingleChoice)
            .with_description("City executive, four-year term")
            .with_candidate(full_candidate("ada", "Ada Park", "Green"))
            .with_candidate(full_candidate("bo", "Bo Reyes", "Civic")),
    )
    .unwrap();
    b
}

#[test]
fn empty_ballot() {
    let r = evaluate(&Ballot::new(), &RuleParams::default());
    assert_eq!(r.keys(Severity::Error), ["ballot-title", "election-date", "no-contests"]);
    assert!(r.warnings().is_empty());
    assert_eq!(r.keys(Severity::Suggestion), ["accessibility-check"]);
    assert!(!r.is_valid());
}

#[test]
fn minimal_valid_ballot_only_gets_accessibility_reminder() {
    let r = evaluate(&minimal_valid_ballot(), &RuleParams::default());
    assert!(r.errors().is_empty());
    assert!(r.warnings().is_empty());
    assert_eq!(r.keys(Severity::Suggestion), ["accessibility-check"]);
    assert!(r.is_valid());
}

#[test]
fn single_candidate_warning_cleared_by_write_in() {
    let mut s = BallotSession::new(Ballot::new(), ValidationEngine::default());
    s.try_edit(|b| {
        b.add_contest(
            Contest::new(cid("chair"), "Chair", ContestType::SingleChoice)
                .with_candidate(Candidate::new(kid("k1"), "Kim")),
        )
    })
    .unwrap();
    assert!(s.report().contains(RuleId::SingleCandidateContest));
    let errors_before = s.report().keys(Severity::Error);

    s.try_edit(|b| b.edit_contest(&cid("chair"), |c| c.allow_write_in = true)).unwrap();
    assert!(!s.report().contains(RuleId::SingleCandidateContest));
    assert_eq!(s.report().keys(Severity::Error), errors_before);
}

#[test]
fn exhaustive_not_fail_fast() {
    let mut b = Ballot::new();
    b.add_contest(Contest::new(cid("c1"), "x".repeat(51), ContestType::MultiChoice)).unwrap();
    let r = evaluate(&b, &RuleParams::default());
    assert_eq!(r.keys(Severity::Error), ["ballot-title", "election-date", "empty-contests"]);
    assert_eq!(r.keys(Severity::Warning), ["long-contest-titles"]);
    assert_eq!(r.keys(Severity::Suggestion), ["no-descriptions", "accessibility-check"]);
}

#[test]
fn long_title_threshold_follows_params() {
    let mut b = minimal_valid_ballot();
    b.edit_contest(&cid("mayor"), |c| c.title = "é".repeat(50)).unwrap();
    assert!(!evaluate(&b, &RuleParams::default()).contains(RuleId::LongContestTitles));
    let strict = RuleParams { max_contest_title_len: 20 };
    assert!(evaluate(&b, &strict).contains(RuleId::LongContestTitles));
}

#[test]
fn misses_report_not_found_and_keep_report() {
    let mut s = BallotSession::new(minimal_valid_ballot(), ValidationEngine::default());
    let before = s.report().clone();
    assert!(s.try_edit(|b| b.edit_contest(&cid("nope"), |c| c.title.clear())).is_err());
    assert!(s.edit(|b| b.delete_contest(&cid("nope"))).is_none());
    assert_eq!(s.report().revision(), before.revision());
    assert!(s.report().same_findings(&before));
}

#[test]
fn removing_last_candidates_flags_empty_contest() {
    let mut s = BallotSession::new(minimal_valid_ballot(), ValidationEngine::default());
    for id in ["ada", "bo"] {
        assert!(s.edit(|b| b.remove_candidate(&cid("mayor"), &kid(id))).is_some());
    }
    assert_eq!(s.report().keys(Severity::Error), ["empty-contests"]);
    assert_eq!(BallotSummary::of(s.ballot()).candidates, 0);
}
