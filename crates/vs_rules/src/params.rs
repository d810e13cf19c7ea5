//! Tunable rule knobs with catalogue defaults.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contest titles longer than this (in UTF-16 code units) draw a warning.
pub const DEFAULT_MAX_CONTEST_TITLE_LEN: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RuleParams {
    pub max_contest_title_len: usize,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            max_contest_title_len: DEFAULT_MAX_CONTEST_TITLE_LEN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamError {
    OutOfDomain(&'static str),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::OutOfDomain(k) => write!(f, "parameter out of domain: {k}"),
        }
    }
}

impl std::error::Error for ParamError {}

/// Reject parameter values no ballot could satisfy.
pub fn validate_domains(p: &RuleParams) -> Result<(), ParamError> {
    if p.max_contest_title_len == 0 {
        return Err(ParamError::OutOfDomain("max_contest_title_len"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_domain() {
        let p = RuleParams::default();
        assert_eq!(p.max_contest_title_len, 50);
        assert!(validate_domains(&p).is_ok());
        assert_eq!(
            validate_domains(&RuleParams { max_contest_title_len: 0 }),
            Err(ParamError::OutOfDomain("max_contest_title_len"))
        );
    }
}
