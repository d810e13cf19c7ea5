//! Built-in ballot templates: catalogue, search, and application to a ballot.
//!
//! Applying a template replaces the ballot's contests with the template's
//! sample contest and sets title + date; the language setting is kept.

use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use vs_core::{Ballot, Candidate, Contest, ContestId, ContestType, CoreError, SettingsPatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Federal,
    State,
    Local,
    Organizational,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Federal,
        Category::State,
        Category::Local,
        Category::Organizational,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Federal => "federal",
            Category::State => "state",
            Category::Local => "local",
            Category::Organizational => "organizational",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Federal => "Federal Elections",
            Category::State => "State Elections",
            Category::Local => "Local Elections",
            Category::Organizational => "Organizational",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(CoreError::DomainOutOfRange("template category"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularityBand {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub contests: u32,
    pub estimated_time: &'static str,
    pub last_used: &'static str,
    /// Percent of ballots built from this template.
    pub popularity: u8,
    pub features: [&'static str; 4],
}

impl Template {
    pub fn popularity_band(&self) -> PopularityBand {
        match self.popularity {
            80.. => PopularityBand::High,
            60..=79 => PopularityBand::Medium,
            _ => PopularityBand::Low,
        }
    }

    fn matches_term(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

pub const TEMPLATES: [Template; 6] = [
    Template {
        id: "federal-general",
        name: "Federal General Election",
        category: Category::Federal,
        description: "Standard template for federal elections including President, Senate, and House races",
        contests: 5,
        estimated_time: "15-20 minutes",
        last_used: "2024-11-05",
        popularity: 95,
        features: ["Multi-level contests", "Party affiliations", "Write-in options", "Accessibility compliant"],
    },
    Template {
        id: "state-primary",
        name: "State Primary Election",
        category: Category::State,
        description: "Template for state-level primary elections with party-specific ballots",
        contests: 8,
        estimated_time: "10-15 minutes",
        last_used: "2024-08-15",
        popularity: 87,
        features: ["Party-specific ballots", "Candidate photos", "Ranked choice voting", "Multi-language support"],
    },
    Template {
        id: "local-municipal",
        name: "Municipal Election",
        category: Category::Local,
        description: "Local government elections including mayor, city council, and ballot measures",
        contests: 6,
        estimated_time: "8-12 minutes",
        last_used: "2024-10-20",
        popularity: 78,
        features: ["Local measures", "Non-partisan races", "District-based voting", "Community focus"],
    },
    Template {
        id: "school-board",
        name: "School Board Election",
        category: Category::Local,
        description: "Educational district elections with candidate profiles and education focus",
        contests: 3,
        estimated_time: "5-8 minutes",
        last_used: "2024-09-12",
        popularity: 65,
        features: ["Education-focused", "Candidate statements", "District boundaries", "Parent-friendly"],
    },
    Template {
        id: "corporate-board",
        name: "Corporate Board Election",
        category: Category::Organizational,
        description: "Corporate governance elections for board members and shareholder proposals",
        contests: 4,
        estimated_time: "6-10 minutes",
        last_used: "2024-07-30",
        popularity: 72,
        features: ["Shareholder voting", "Proxy options", "Financial disclosures", "Corporate governance"],
    },
    Template {
        id: "union-election",
        name: "Union Representative Election",
        category: Category::Organizational,
        description: "Labor union elections for representatives and contract ratification",
        contests: 2,
        estimated_time: "4-6 minutes",
        last_used: "2024-06-18",
        popularity: 58,
        features: ["Member verification", "Contract voting", "Representative selection", "Union-specific"],
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Case-insensitive substring match over name or description, restricted to
/// `category` when given. An empty term matches every template; surrounding
/// whitespace in the term is significant.
pub fn search(term: &str, category: Option<Category>) -> Vec<&'static Template> {
    let needle = term.to_lowercase();
    TEMPLATES
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .filter(|t| t.matches_term(&needle))
        .collect()
}

/// Replace the ballot body with the template's sample contest.
pub fn apply_template(ballot: &mut Ballot, template: &Template) -> Result<(), CoreError> {
    let date = NaiveDate::from_ymd_opt(2024, 11, 5).ok_or(CoreError::DomainOutOfRange("template date"))?;
    let contest_id: ContestId = format!("{}-contest-1", template.id).parse()?;

    ballot.clear_contests();
    let first = ballot.next_candidate_id();
    let second = ballot.next_candidate_id();
    let contest = Contest::new(contest_id, format!("{} - Contest 1", template.name), ContestType::SingleChoice)
        .with_description("Sample contest from template")
        .with_candidate(
            Candidate::new(first, "John Smith")
                .with_party("Democratic Party")
                .with_description("Experienced public servant with 15 years in local government")
                .with_photo("https://randomuser.me/api/portraits/men/32.jpg"),
        )
        .with_candidate(
            Candidate::new(second, "Sarah Johnson")
                .with_party("Republican Party")
                .with_description("Business leader focused on economic development")
                .with_photo("https://randomuser.me/api/portraits/women/44.jpg"),
        );
    ballot.add_contest(contest)?;
    ballot.set_settings(SettingsPatch::default().title(template.name).date(date));
    tracing::debug!(template = template.id, revision = ballot.revision(), "template applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::evaluate;
    use vs_rules::{RuleParams, Severity};

    #[test]
    fn search_by_term_and_category() {
        let ids = |v: Vec<&Template>| v.into_iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(search("", None).len(), 6);
        assert_eq!(ids(search("", Some(Category::Local))), ["local-municipal", "school-board"]);
        assert_eq!(ids(search("BOARD", None)), ["school-board", "corporate-board"]);
        assert_eq!(ids(search("mayor", None)), ["local-municipal"]);
        assert!(search("board", Some(Category::Federal)).is_empty());
    }

    #[test]
    fn search_term_is_not_trimmed() {
        assert!(search("mayor ", None).is_empty());
        assert!(search("   ", None).is_empty());
        let ids: Vec<_> = search(" board", None).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["school-board", "corporate-board"]);
    }

    #[test]
    fn popularity_bands() {
        let band = |id| find(id).unwrap().popularity_band();
        assert_eq!(band("federal-general"), PopularityBand::High);
        assert_eq!(band("local-municipal"), PopularityBand::Medium);
        assert_eq!(band("union-election"), PopularityBand::Low);
    }

    #[test]
    fn applied_template_yields_valid_ballot() {
        let mut b = Ballot::new();
        b.set_settings(SettingsPatch::default().language("fr"));
        b.add_contest(Contest::new("old".parse().unwrap(), "Old", ContestType::Approval)).unwrap();

        apply_template(&mut b, find("school-board").unwrap()).unwrap();
        assert_eq!(b.contests().len(), 1);
        assert_eq!(b.contests()[0].id.as_str(), "school-board-contest-1");
        assert_eq!(b.settings().title, "School Board Election");
        assert_eq!(b.settings().language, "fr");

        let r = evaluate(&b, &RuleParams::default());
        assert!(r.is_valid());
        assert!(r.warnings().is_empty());
        assert_eq!(r.keys(Severity::Suggestion), ["accessibility-check"]);
    }

    #[test]
    fn category_tokens() {
        assert_eq!("state".parse::<Category>().unwrap(), Category::State);
        assert!("all".parse::<Category>().is_err());
    }
}
