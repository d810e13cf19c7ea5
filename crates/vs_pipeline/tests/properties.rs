use chrono::NaiveDate;
use proptest::prelude::*;

use vs_core::{Ballot, BallotSettings, Candidate, CandidateId, Contest, ContestId, ContestType};
use vs_pipeline::simulate::{simulate, VoterProfile};
use vs_pipeline::{evaluate, evaluate_at};
use vs_rules::{RuleId, RuleParams, Severity};

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("  ".to_string()), "[A-Za-z ]{1,70}"]
}

fn arb_opt_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(arb_text())
}

fn arb_kind() -> impl Strategy<Value = ContestType> {
    prop::sample::select(ContestType::ALL.to_vec())
}

type CandidateParts = (String, Option<String>, Option<String>);
type ContestParts = (String, Option<String>, ContestType, bool, Vec<CandidateParts>);

fn arb_contest() -> impl Strategy<Value = ContestParts> {
    let cand = (arb_text(), arb_opt_text(), arb_opt_text());
    (arb_text(), arb_opt_text(), arb_kind(), any::<bool>(), prop::collection::vec(cand, 0..4))
}

fn build(title: String, dated: bool, contests: Vec<ContestParts>) -> Ballot {
    let settings = BallotSettings {
        title,
        date: dated.then(|| NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()),
        ..BallotSettings::default()
    };
    let mut n = 0u64;
    let contests = contests
        .into_iter()
        .enumerate()
        .map(|(i, (title, description, kind, write_in, cands))| {
            let mut c = Contest::new(ContestId::sequential(i as u64 + 1), title, kind).with_write_in(write_in);
            c.description = description;
            for (name, party, photo) in cands {
                n += 1;
                let mut k = Candidate::new(CandidateId::sequential(n), name);
                k.party = party;
                k.photo = photo;
                c.candidates.push(k);
            }
            c
        })
        .collect();
    Ballot::from_parts(settings, contests).unwrap()
}

fn arb_ballot() -> impl Strategy<Value = Ballot> {
    (arb_text(), any::<bool>(), prop::collection::vec(arb_contest(), 0..4))
        .prop_map(|(title, dated, contests)| build(title, dated, contests))
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(b in arb_ballot()) {
        let p = RuleParams::default();
        let at = chrono::Utc::now();
        prop_assert_eq!(evaluate_at(&b, &p, at), evaluate_at(&b, &p, at));
        prop_assert!(evaluate(&b, &p).same_findings(&evaluate(&b, &p)));
    }

    #[test]
    fn validity_matches_error_list(b in arb_ballot()) {
        let r = evaluate(&b, &RuleParams::default());
        prop_assert_eq!(r.is_valid(), r.errors().is_empty());
    }

    #[test]
    fn accessibility_always_suggested(b in arb_ballot()) {
        let r = evaluate(&b, &RuleParams::default());
        prop_assert_eq!(r.keys(Severity::Suggestion).last().copied(), Some("accessibility-check"));
    }

    #[test]
    fn issues_sit_in_their_severity_bucket(b in arb_ballot()) {
        let r = evaluate(&b, &RuleParams::default());
        for sev in [Severity::Error, Severity::Warning, Severity::Suggestion] {
            for issue in r.issues(sev) {
                prop_assert_eq!(issue.id.severity(), sev);
                prop_assert_eq!(issue.message.as_str(), issue.id.message());
            }
        }
    }

    #[test]
    fn second_candidate_only_clears_single_candidate_warning(b in arb_ballot()) {
        let p = RuleParams::default();
        let before = evaluate(&b, &p);
        let mut b = b;
        let lone: Vec<ContestId> = b
            .contests()
            .iter()
            .filter(|c| c.candidates.len() == 1 && !c.allow_write_in)
            .map(|c| c.id.clone())
            .collect();
        for id in &lone {
            let existing = b.contest(id).unwrap().candidates[0].clone();
            let twin_id = b.next_candidate_id();
            let twin = Candidate { id: twin_id, ..existing };
            b.add_candidate(id, twin).unwrap();
        }
        let after = evaluate(&b, &p);
        prop_assert!(!after.contains(RuleId::SingleCandidateContest));
        let strip = |keys: Vec<&'static str>| {
            keys.into_iter().filter(|k| *k != "single-candidate-contest").collect::<Vec<_>>()
        };
        prop_assert_eq!(after.keys(Severity::Error), before.keys(Severity::Error));
        prop_assert_eq!(strip(after.keys(Severity::Warning)), strip(before.keys(Severity::Warning)));
        prop_assert_eq!(after.keys(Severity::Suggestion), before.keys(Severity::Suggestion));
    }

    #[test]
    fn simulation_is_seed_stable(seed in any::<u64>(), i in 0usize..4) {
        let profile = VoterProfile::ALL[i];
        prop_assert_eq!(simulate(profile, seed), simulate(profile, seed));
    }
}
