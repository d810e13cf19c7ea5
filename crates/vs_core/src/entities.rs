//! Ballot entities: candidates, contests, and global ballot settings.
//!
//! Construction never validates content (blank names, missing dates, …):
//! flagging incomplete ballots is the job of the rule catalogue in `vs_rules`.
//! The only checked domain here is `max_selections >= 1`.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::{CandidateId, ContestId};

pub const DEFAULT_LANGUAGE: &str = "en";

/* ----------------------------------- Candidate ----------------------------------- */

/// One selectable option within a contest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Candidate {
    pub id: CandidateId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub party: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// Portrait reference (URL or path).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub photo: Option<String>,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            party: None,
            description: None,
            photo: None,
        }
    }

    pub fn with_party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

/* ---------------------------------- ContestType ---------------------------------- */

/// Voting method of a contest (closed set).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ContestType {
    #[default]
    SingleChoice,
    MultiChoice,
    RankedChoice,
    Approval,
}

impl ContestType {
    pub const ALL: [ContestType; 4] = [
        ContestType::SingleChoice,
        ContestType::MultiChoice,
        ContestType::RankedChoice,
        ContestType::Approval,
    ];

    /// Wire token, e.g. `"ranked-choice"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ContestType::SingleChoice => "single-choice",
            ContestType::MultiChoice => "multi-choice",
            ContestType::RankedChoice => "ranked-choice",
            ContestType::Approval => "approval",
        }
    }

    /// Human label shown in the builder.
    pub fn label(self) -> &'static str {
        match self {
            ContestType::SingleChoice => "Single Choice",
            ContestType::MultiChoice => "Multiple Choice",
            ContestType::RankedChoice => "Ranked Choice",
            ContestType::Approval => "Approval Voting",
        }
    }
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestType {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContestType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(CoreError::DomainOutOfRange("contest type"))
    }
}

/* ------------------------------------ Contest ------------------------------------ */

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

/// Files without `createdAt` load with a fixed stamp so repeated loads hash alike.
#[cfg(feature = "serde")]
fn unstamped() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// One race or question on the ballot. Candidate order is display order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Contest {
    pub id: ContestId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: ContestType,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub max_selections: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_write_in: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub candidates: Vec<Candidate>,
    #[cfg_attr(feature = "serde", serde(default = "unstamped"))]
    pub created_at: DateTime<Utc>,
}

impl Contest {
    /// New contest with no candidates, one selection, no write-in, stamped now.
    pub fn new(id: ContestId, title: impl Into<String>, kind: ContestType) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            kind,
            max_selections: 1,
            allow_write_in: false,
            candidates: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_write_in(mut self, allow: bool) -> Self {
        self.allow_write_in = allow;
        self
    }

    pub fn with_candidate(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn with_max_selections(mut self, n: u32) -> Result<Self, CoreError> {
        self.set_max_selections(n)?;
        Ok(self)
    }

    pub fn set_max_selections(&mut self, n: u32) -> Result<(), CoreError> {
        if n == 0 {
            return Err(CoreError::DomainOutOfRange("max_selections must be >= 1"));
        }
        self.max_selections = n;
        Ok(())
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    pub(crate) fn candidate_index(&self, id: &CandidateId) -> Option<usize> {
        self.candidates.iter().position(|c| &c.id == id)
    }
}

/* -------------------------------- Ballot settings -------------------------------- */

#[cfg(feature = "serde")]
mod blank_date {
    //! `""` and `null` both mean "no date", matching the builder's empty form state.

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(v: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(feature = "serde")]
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Global ballot settings; one mutable record per ballot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BallotSettings {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default, with = "blank_date"))]
    pub date: Option<NaiveDate>,
    /// Locale code ("en", "es", "fr", …). Not part of validity.
    #[cfg_attr(feature = "serde", serde(default = "default_language"))]
    pub language: String,
}

impl Default for BallotSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Partial settings update; `None` leaves a field untouched.
/// `date: Some(None)` clears the election date.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub title: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub language: Option<String>,
}

impl SettingsPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(Some(date));
        self
    }

    pub fn clear_date(mut self) -> Self {
        self.date = Some(None);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.language.is_none()
    }

    /// Merge into `settings`; returns whether anything changed.
    pub fn apply(self, settings: &mut BallotSettings) -> bool {
        let before = settings.clone();
        if let Some(title) = self.title {
            settings.title = title;
        }
        if let Some(date) = self.date {
            settings.date = date;
        }
        if let Some(language) = self.language {
            settings.language = language;
        }
        *settings != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> ContestId {
        s.parse().unwrap()
    }

    #[test]
    fn contest_type_tokens_round_trip() {
        for t in ContestType::ALL {
            assert_eq!(t.as_str().parse::<ContestType>().unwrap(), t);
        }
        assert!("plurality".parse::<ContestType>().is_err());
    }

    #[test]
    fn max_selections_must_be_positive() {
        let c = Contest::new(cid("c1"), "Council", ContestType::MultiChoice);
        assert_eq!(c.max_selections, 1);
        assert!(c.clone().with_max_selections(0).is_err());
        assert_eq!(c.with_max_selections(3).unwrap().max_selections, 3);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut s = BallotSettings::default();
        let date = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
        assert!(SettingsPatch::default().title("General").date(date).apply(&mut s));
        assert_eq!(s.title, "General");
        assert_eq!(s.date, Some(date));
        assert_eq!(s.language, "en");

        assert!(!SettingsPatch::default().title("General").apply(&mut s));
        assert!(SettingsPatch::default().clear_date().apply(&mut s));
        assert_eq!(s.date, None);
    }
}
