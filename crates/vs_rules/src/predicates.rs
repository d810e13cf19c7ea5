//! Pure rule predicates. Each returns `true` when the problem is present.
//!
//! Ballot-wide "any" semantics: one offending contest or candidate is enough
//! to flag the rule, and a rule is flagged at most once per evaluation.

use vs_core::{is_blank, Ballot};

use crate::params::RuleParams;

pub fn ballot_title_missing(b: &Ballot) -> bool {
    b.settings().title.trim().is_empty()
}

pub fn election_date_missing(b: &Ballot) -> bool {
    b.settings().date.is_none()
}

pub fn no_contests(b: &Ballot) -> bool {
    b.contests().is_empty()
}

pub fn any_empty_contest(b: &Ballot) -> bool {
    b.contests().iter().any(|c| c.candidates.is_empty())
}

pub fn any_candidate_name_missing(b: &Ballot) -> bool {
    b.candidates().any(|(_, k)| k.name.trim().is_empty())
}

/// Exactly one candidate and no write-in slot: voters get no real choice.
pub fn any_single_candidate_contest(b: &Ballot) -> bool {
    b.contests()
        .iter()
        .any(|c| c.candidates.len() == 1 && !c.allow_write_in)
}

/// Length is measured in UTF-16 code units, so an emoji counts as two.
pub fn any_long_contest_title(b: &Ballot, p: &RuleParams) -> bool {
    b.contests()
        .iter()
        .any(|c| c.title.encode_utf16().count() > p.max_contest_title_len)
}

pub fn any_candidate_party_missing(b: &Ballot) -> bool {
    b.candidates().any(|(_, k)| is_blank(k.party.as_deref()))
}

pub fn any_contest_description_missing(b: &Ballot) -> bool {
    b.contests().iter().any(|c| is_blank(c.description.as_deref()))
}

/// An empty string counts as "no photo", same as an absent one.
pub fn any_candidate_photo_missing(b: &Ballot) -> bool {
    b.candidates()
        .any(|(_, k)| k.photo.as_deref().map_or(true, str::is_empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vs_core::{Candidate, Contest, ContestType, SettingsPatch};

    fn ballot_with(contest: Contest) -> Ballot {
        let mut b = Ballot::new();
        b.add_contest(contest).unwrap();
        b
    }

    fn contest(title: &str) -> Contest {
        Contest::new("c1".parse().unwrap(), title, ContestType::SingleChoice)
    }

    fn cand(id: &str, name: &str) -> Candidate {
        Candidate::new(id.parse().unwrap(), name)
    }

    #[test]
    fn title_whitespace_counts_as_missing() {
        let mut b = Ballot::new();
        assert!(ballot_title_missing(&b));
        b.set_settings(SettingsPatch::default().title("   "));
        assert!(ballot_title_missing(&b));
        b.set_settings(SettingsPatch::default().title("General"));
        assert!(!ballot_title_missing(&b));
    }

    #[test]
    fn date_presence() {
        let mut b = Ballot::new();
        assert!(election_date_missing(&b));
        b.set_settings(SettingsPatch::default().date(NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()));
        assert!(!election_date_missing(&b));
    }

    #[test]
    fn contest_level_checks() {
        let b = Ballot::new();
        assert!(no_contests(&b));
        assert!(!any_empty_contest(&b));
        assert!(!any_contest_description_missing(&b));

        let b = ballot_with(contest("Mayor"));
        assert!(!no_contests(&b));
        assert!(any_empty_contest(&b));
        assert!(any_contest_description_missing(&b));

        let b = ballot_with(contest("Mayor").with_description(" "));
        assert!(any_contest_description_missing(&b));
        let b = ballot_with(contest("Mayor").with_description("Chief executive"));
        assert!(!any_contest_description_missing(&b));
    }

    #[test]
    fn single_candidate_depends_on_write_in() {
        let one = contest("Mayor").with_candidate(cand("k1", "A"));
        assert!(any_single_candidate_contest(&ballot_with(one.clone())));
        assert!(!any_single_candidate_contest(&ballot_with(one.clone().with_write_in(true))));
        let two = one.with_candidate(cand("k2", "B"));
        assert!(!any_single_candidate_contest(&ballot_with(two)));
    }

    #[test]
    fn long_titles_use_utf16_length_and_param() {
        let p = RuleParams::default();
        let exactly = "é".repeat(50);
        assert!(!any_long_contest_title(&ballot_with(contest(&exactly)), &p));
        let over = "x".repeat(51);
        assert!(any_long_contest_title(&ballot_with(contest(&over)), &p));
        let relaxed = RuleParams { max_contest_title_len: 60 };
        assert!(!any_long_contest_title(&ballot_with(contest(&over)), &relaxed));
    }

    #[test]
    fn astral_characters_count_double() {
        let p = RuleParams::default();
        let ballots = "\u{1F5F3}".repeat(26);
        assert_eq!(ballots.chars().count(), 26);
        assert!(any_long_contest_title(&ballot_with(contest(&ballots)), &p));
        let fits = "\u{1F5F3}".repeat(25);
        assert!(!any_long_contest_title(&ballot_with(contest(&fits)), &p));
    }

    #[test]
    fn candidate_level_checks() {
        let b = ballot_with(contest("Mayor").with_candidate(cand("k1", " ")));
        assert!(any_candidate_name_missing(&b));
        assert!(any_candidate_party_missing(&b));
        assert!(any_candidate_photo_missing(&b));

        let full = cand("k1", "Ada").with_party("Independent").with_photo("ada.jpg");
        let b = ballot_with(contest("Mayor").with_candidate(full.clone()));
        assert!(!any_candidate_name_missing(&b));
        assert!(!any_candidate_party_missing(&b));
        assert!(!any_candidate_photo_missing(&b));

        let b = ballot_with(contest("Mayor").with_candidate(full.with_photo("")));
        assert!(any_candidate_photo_missing(&b));
    }
}
