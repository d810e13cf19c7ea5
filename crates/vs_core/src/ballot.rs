//! The owning ballot: settings plus an ordered, id-unique list of contests.
//!
//! Policy for misses (unknown contest/candidate id): updates return
//! `CoreError::ContestNotFound` / `CoreError::CandidateNotFound`; deletes
//! return `None`. Either way the ballot and its revision are left untouched.
//!
//! Every successful mutation bumps `revision`, which downstream consumers use
//! to decide whether a cached validation report is stale.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::{BallotSettings, Candidate, Contest, SettingsPatch};
use crate::errors::CoreError;
use crate::ids::{CandidateId, ContestId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ballot {
    #[cfg_attr(feature = "serde", serde(default))]
    settings: BallotSettings,
    #[cfg_attr(feature = "serde", serde(default))]
    contests: Vec<Contest>,
    #[cfg_attr(feature = "serde", serde(skip))]
    revision: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    next_contest: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    next_candidate: u64,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ballot from parts, enforcing id uniqueness.
    pub fn from_parts(settings: BallotSettings, contests: Vec<Contest>) -> Result<Self, CoreError> {
        let mut ballot = Ballot { settings, ..Ballot::default() };
        for contest in contests {
            ballot.add_contest(contest)?;
        }
        ballot.revision = 0;
        Ok(ballot)
    }

    /// Re-check the uniqueness invariants (for ballots that came off the wire).
    pub fn check_ids(&self) -> Result<(), CoreError> {
        let mut contest_ids = BTreeSet::new();
        let mut candidate_ids = BTreeSet::new();
        for contest in &self.contests {
            if !contest_ids.insert(&contest.id) {
                return Err(CoreError::DuplicateContest(contest.id.clone()));
            }
            for candidate in &contest.candidates {
                if !candidate_ids.insert(&candidate.id) {
                    return Err(CoreError::DuplicateCandidate(candidate.id.clone()));
                }
            }
        }
        Ok(())
    }

    /* ------------------------------- read access ------------------------------- */

    pub fn settings(&self) -> &BallotSettings {
        &self.settings
    }

    pub fn contests(&self) -> &[Contest] {
        &self.contests
    }

    pub fn contest(&self, id: &ContestId) -> Option<&Contest> {
        self.contests.iter().find(|c| &c.id == id)
    }

    /// All candidates in display order, paired with their contest.
    pub fn candidates(&self) -> impl Iterator<Item = (&Contest, &Candidate)> {
        self.contests
            .iter()
            .flat_map(|contest| contest.candidates.iter().map(move |cand| (contest, cand)))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /* ------------------------------ id allocation ------------------------------ */

    /// Allocate a contest id not used anywhere in this ballot.
    pub fn next_contest_id(&mut self) -> ContestId {
        loop {
            self.next_contest += 1;
            let id = ContestId::sequential(self.next_contest);
            if self.contest(&id).is_none() {
                return id;
            }
        }
    }

    /// Allocate a candidate id not used anywhere in this ballot.
    pub fn next_candidate_id(&mut self) -> CandidateId {
        loop {
            self.next_candidate += 1;
            let id = CandidateId::sequential(self.next_candidate);
            if !self.has_candidate(&id) {
                return id;
            }
        }
    }

    fn has_candidate(&self, id: &CandidateId) -> bool {
        self.candidates().any(|(_, c)| &c.id == id)
    }

    /* -------------------------------- contests -------------------------------- */

    /// Append a contest. Content is not validated; only id uniqueness is enforced.
    pub fn add_contest(&mut self, contest: Contest) -> Result<(), CoreError> {
        if self.contest(&contest.id).is_some() {
            return Err(CoreError::DuplicateContest(contest.id));
        }
        check_contest_domain(&contest)?;
        self.check_candidate_ids(&contest, None)?;
        self.contests.push(contest);
        self.touch();
        Ok(())
    }

    /// Replace the contest with the same id, keeping its position.
    pub fn update_contest(&mut self, contest: Contest) -> Result<(), CoreError> {
        let idx = self
            .contest_index(&contest.id)
            .ok_or_else(|| CoreError::ContestNotFound(contest.id.clone()))?;
        check_contest_domain(&contest)?;
        self.check_candidate_ids(&contest, Some(idx))?;
        self.contests[idx] = contest;
        self.touch();
        Ok(())
    }

    /// Field-level edit of one contest in place. The contest id cannot be changed.
    pub fn edit_contest<F>(&mut self, id: &ContestId, edit: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Contest),
    {
        let idx = self
            .contest_index(id)
            .ok_or_else(|| CoreError::ContestNotFound(id.clone()))?;
        let mut draft = self.contests[idx].clone();
        edit(&mut draft);
        draft.id = id.clone();
        self.update_contest(draft)
    }

    /// Remove a contest and its candidates. `None` when the id is unknown.
    pub fn delete_contest(&mut self, id: &ContestId) -> Option<Contest> {
        let idx = self.contest_index(id)?;
        let removed = self.contests.remove(idx);
        self.touch();
        Some(removed)
    }

    /// Drop every contest (used when a template replaces the ballot body).
    pub fn clear_contests(&mut self) -> Vec<Contest> {
        let removed = std::mem::take(&mut self.contests);
        if !removed.is_empty() {
            self.touch();
        }
        removed
    }

    /* ------------------------------- candidates ------------------------------- */

    pub fn add_candidate(&mut self, contest_id: &ContestId, candidate: Candidate) -> Result<(), CoreError> {
        let idx = self
            .contest_index(contest_id)
            .ok_or_else(|| CoreError::ContestNotFound(contest_id.clone()))?;
        if self.has_candidate(&candidate.id) {
            return Err(CoreError::DuplicateCandidate(candidate.id));
        }
        self.contests[idx].candidates.push(candidate);
        self.touch();
        Ok(())
    }

    /// Replace the candidate with the same id inside `contest_id`, keeping its position.
    pub fn update_candidate(&mut self, contest_id: &ContestId, candidate: Candidate) -> Result<(), CoreError> {
        let (ci, ki) = self.candidate_position(contest_id, &candidate.id)?;
        self.contests[ci].candidates[ki] = candidate;
        self.touch();
        Ok(())
    }

    /// Field-level edit of one candidate in place. The candidate id cannot be changed.
    pub fn edit_candidate<F>(
        &mut self,
        contest_id: &ContestId,
        candidate_id: &CandidateId,
        edit: F,
    ) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Candidate),
    {
        let (ci, ki) = self.candidate_position(contest_id, candidate_id)?;
        let slot = &mut self.contests[ci].candidates[ki];
        edit(slot);
        slot.id = candidate_id.clone();
        self.touch();
        Ok(())
    }

    /// Remove a candidate. `None` when the contest or candidate is unknown.
    pub fn remove_candidate(&mut self, contest_id: &ContestId, candidate_id: &CandidateId) -> Option<Candidate> {
        let (ci, ki) = self.candidate_position(contest_id, candidate_id).ok()?;
        let removed = self.contests[ci].candidates.remove(ki);
        self.touch();
        Some(removed)
    }

    /* -------------------------------- settings -------------------------------- */

    /// Merge a partial update into the settings. Revision moves only on change.
    pub fn set_settings(&mut self, patch: SettingsPatch) {
        if patch.apply(&mut self.settings) {
            self.touch();
        }
    }

    /* -------------------------------- internals -------------------------------- */

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn contest_index(&self, id: &ContestId) -> Option<usize> {
        self.contests.iter().position(|c| &c.id == id)
    }

    fn candidate_position(
        &self,
        contest_id: &ContestId,
        candidate_id: &CandidateId,
    ) -> Result<(usize, usize), CoreError> {
        let ci = self
            .contest_index(contest_id)
            .ok_or_else(|| CoreError::ContestNotFound(contest_id.clone()))?;
        let ki = self.contests[ci]
            .candidate_index(candidate_id)
            .ok_or_else(|| CoreError::CandidateNotFound {
                contest: contest_id.clone(),
                candidate: candidate_id.clone(),
            })?;
        Ok((ci, ki))
    }

    /// Candidate ids of `contest` must be unique among themselves and must not
    /// appear in any other contest (`skip` = index of the contest being replaced).
    fn check_candidate_ids(&self, contest: &Contest, skip: Option<usize>) -> Result<(), CoreError> {
        let mut seen = BTreeSet::new();
        for candidate in &contest.candidates {
            if !seen.insert(&candidate.id) {
                return Err(CoreError::DuplicateCandidate(candidate.id.clone()));
            }
        }
        let clash = self
            .contests
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .flat_map(|(_, c)| c.candidates.iter())
            .find(|c| seen.contains(&c.id));
        match clash {
            Some(c) => Err(CoreError::DuplicateCandidate(c.id.clone())),
            None => Ok(()),
        }
    }
}

/// Field domains every stored contest must satisfy.
fn check_contest_domain(contest: &Contest) -> Result<(), CoreError> {
    if contest.max_selections == 0 {
        return Err(CoreError::DomainOutOfRange("max_selections must be >= 1"));
    }
    Ok(())
}
