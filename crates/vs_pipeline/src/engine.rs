//! Reactive validation: the engine keeps the last report together with the
//! ballot it was computed from, and re-evaluates whenever the ballot differs; `BallotSession` owns a ballot and
//! re-validates after every edit so the cached report never goes stale.
//!
//! A new report is fully built before it replaces the previous one and before
//! any observer sees it; consumers never observe a partial report.

use core::fmt;

use vs_core::{Ballot, CoreError};
use vs_rules::{validate_domains, ParamError, RuleParams};

use crate::validate::{evaluate, ValidationReport};

type Observer = Box<dyn FnMut(&ValidationReport)>;

pub struct ValidationEngine {
    params: RuleParams,
    last: Option<ValidationReport>,
    /// Ballot that produced `last`. Revisions alone cannot tell two ballots apart.
    seen: Option<Ballot>,
    observers: Vec<Observer>,
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("params", &self.params)
            .field("last", &self.last)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self {
            params: RuleParams::default(),
            last: None,
            seen: None,
            observers: Vec::new(),
        }
    }
}

impl ValidationEngine {
    pub fn new(params: RuleParams) -> Result<Self, ParamError> {
        validate_domains(&params)?;
        Ok(Self { params, ..Self::default() })
    }

    pub fn params(&self) -> &RuleParams {
        &self.params
    }

    /// Swap rule parameters; the cached report is dropped since it may no longer hold.
    pub fn set_params(&mut self, params: RuleParams) -> Result<(), ParamError> {
        validate_domains(&params)?;
        self.params = params;
        self.last = None;
        self.seen = None;
        Ok(())
    }

    /// Register a listener called with every new report.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ValidationReport) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last.as_ref()
    }

    /// True unless the cached report was computed from a ballot equal to `ballot`.
    pub fn is_stale(&self, ballot: &Ballot) -> bool {
        self.last.is_none() || self.seen.as_ref() != Some(ballot)
    }

    /// Re-evaluate only if the ballot changed since the cached report.
    pub fn refresh(&mut self, ballot: &Ballot) -> &ValidationReport {
        if self.is_stale(ballot) {
            return self.run(ballot);
        }
        tracing::trace!(revision = ballot.revision(), "validation cache hit");
        let params = &self.params;
        self.last.get_or_insert_with(|| evaluate(ballot, params))
    }

    /// Manual re-run, regardless of the cache.
    pub fn revalidate(&mut self, ballot: &Ballot) -> &ValidationReport {
        self.run(ballot)
    }

    fn run(&mut self, ballot: &Ballot) -> &ValidationReport {
        let report = evaluate(ballot, &self.params);
        self.seen = Some(ballot.clone());
        for observer in self.observers.iter_mut() {
            observer(&report);
        }
        self.last.insert(report)
    }
}

/// One ballot under construction together with its live validation report.
#[derive(Debug, Default)]
pub struct BallotSession {
    ballot: Ballot,
    engine: ValidationEngine,
}

impl BallotSession {
    pub fn new(ballot: Ballot, engine: ValidationEngine) -> Self {
        let mut session = Self { ballot, engine };
        session.engine.refresh(&session.ballot);
        session
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    pub fn engine_mut(&mut self) -> &mut ValidationEngine {
        &mut self.engine
    }

    /// Apply one mutation, then bring the report up to date. The closure's
    /// result is passed through (misses are reported, not swallowed).
    pub fn edit<T, F>(&mut self, mutate: F) -> T
    where
        F: FnOnce(&mut Ballot) -> T,
    {
        let out = mutate(&mut self.ballot);
        self.engine.refresh(&self.ballot);
        out
    }

    /// Like [`edit`](Self::edit) for the fallible model operations, logging misses.
    pub fn try_edit<F>(&mut self, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Ballot) -> Result<(), CoreError>,
    {
        let out = self.edit(mutate);
        if let Err(ref e) = out {
            tracing::warn!(error = %e, "ballot edit rejected; state unchanged");
        }
        out
    }

    /// Current report (always matches the current ballot revision).
    pub fn report(&mut self) -> &ValidationReport {
        self.engine.refresh(&self.ballot)
    }

    pub fn revalidate(&mut self) -> &ValidationReport {
        self.engine.revalidate(&self.ballot)
    }

    pub fn into_ballot(self) -> Ballot {
        self.ballot
    }
}
