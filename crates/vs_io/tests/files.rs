use std::fs;
use std::path::Path;

use assert_json_diff::assert_json_eq;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

use vs_core::{Ballot, Candidate, Contest, ContestType, SettingsPatch};
use vs_io::{fingerprint, load_ballot, load_rule_params, save_ballot, IoError};

fn sample() -> Ballot {
    let mut b = Ballot::new();
    b.set_settings(
        SettingsPatch::default()
            .title("Spring Board Vote")
            .date(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()),
    );
    b.add_contest(
        Contest::new("treasurer".parse().unwrap(), "Treasurer", ContestType::RankedChoice)
            .with_write_in(true)
            .with_created_at(Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap())
            .with_candidate(Candidate::new("lee".parse().unwrap(), "Lee Wong").with_party("Independent")),
    )
    .unwrap();
    b
}

#[test]
fn saved_ballot_uses_wire_names_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ballot.json");
    let ballot = sample();
    save_ballot(&path, &ballot).unwrap();

    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_json_eq!(
        on_disk,
        json!({
            "settings": {"title": "Spring Board Vote", "date": "2025-04-02", "language": "en"},
            "contests": [{
                "id": "treasurer",
                "title": "Treasurer",
                "type": "ranked-choice",
                "maxSelections": 1,
                "allowWriteIn": true,
                "createdAt": "2025-01-10T09:30:00Z",
                "candidates": [{"id": "lee", "name": "Lee Wong", "party": "Independent"}]
            }]
        })
    );

    let back = load_ballot(&path).unwrap();
    assert_eq!(back.contests(), ballot.contests());
    assert_eq!(back.settings(), ballot.settings());
    assert_eq!(fingerprint(&back).unwrap(), fingerprint(&ballot).unwrap());
}

#[test]
fn blank_date_and_missing_fields_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.json");
    fs::write(&path, r#"{"settings":{"title":"","date":""},"contests":[{"id":"c1"}]}"#).unwrap();
    let b = load_ballot(&path).unwrap();
    assert_eq!(b.settings().date, None);
    assert_eq!(b.settings().language, "en");
    let c = &b.contests()[0];
    assert_eq!((c.kind, c.max_selections, c.allow_write_in), (ContestType::SingleChoice, 1, false));
}

#[test]
fn fingerprint_tracks_content() {
    let a = sample();
    let mut b = sample();
    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    b.set_settings(SettingsPatch::default().language("es"));
    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    assert_eq!(fingerprint(&a).unwrap().len(), 64);
}

#[test]
fn unstamped_contests_hash_the_same_on_every_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ballot.json");
    fs::write(
        &path,
        r#"{"settings":{"title":"Board"},"contests":[{"id":"c1","title":"Chair","candidates":[{"id":"k1","name":"A"}]}]}"#,
    )
    .unwrap();
    let first = load_ballot(&path).unwrap();
    let second = load_ballot(&path).unwrap();
    assert_eq!(first.contests()[0].created_at.timestamp(), 0);
    assert_eq!(fingerprint(&first).unwrap(), fingerprint(&second).unwrap());
}

#[test]
fn rule_params_file() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("rules.json");
    fs::write(&ok, r#"{"max_contest_title_len": 72}"#).unwrap();
    assert_eq!(load_rule_params(&ok).unwrap().max_contest_title_len, 72);

    let zero = dir.path().join("zero.json");
    fs::write(&zero, r#"{"max_contest_title_len": 0}"#).unwrap();
    assert!(matches!(load_rule_params(&zero), Err(IoError::Invalid(_))));

    let unknown = dir.path().join("unknown.json");
    fs::write(&unknown, r#"{"max_title": 10}"#).unwrap();
    assert!(matches!(load_rule_params(&unknown), Err(IoError::Json { .. })));
}

#[test]
fn missing_file_and_urls_are_path_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_ballot(&dir.path().join("none.json")), Err(IoError::Path(_))));
    assert!(matches!(load_ballot(Path::new("https://example.org/b.json")), Err(IoError::Path(_))));
}
