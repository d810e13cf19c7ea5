use serde::Serialize;

use vs_core::Ballot;

/// Counts shown in the ballot preview stats bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotSummary {
    pub contests: usize,
    pub candidates: usize,
    pub write_in_contests: usize,
}

impl BallotSummary {
    pub fn of(ballot: &Ballot) -> Self {
        let contests = ballot.contests();
        Self {
            contests: contests.len(),
            candidates: contests.iter().map(|c| c.candidates.len()).sum(),
            write_in_contests: contests.iter().filter(|c| c.allow_write_in).count(),
        }
    }
}
