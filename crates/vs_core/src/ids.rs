//! Token ids for contests and candidates.
//! ASCII-only, `^[A-Za-z0-9_.:-]{1,64}$`, validated on parse and on deserialize.

use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;

const TOKEN_MAX_LEN: usize = 64;

/// Token for ContestId/CandidateId: ^[A-Za-z0-9_.:-]{1,64}$
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let len = s.len();
    if len == 0 || len > TOKEN_MAX_LEN {
        return false;
    }
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-'))
}

macro_rules! token_newtype {
    ($(#[$m:meta])* $name:ident, $prefix:literal) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }

            /// Sequential id used by the ballot's allocator, e.g. `contest-0007`.
            pub fn sequential(n: u64) -> Self {
                Self(format!(concat!($prefix, "-{:04}"), n))
            }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_valid_token(s) {
                    Ok(Self(s.to_owned()))
                } else {
                    Err(CoreError::InvalidId(s.to_owned()))
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                use serde::de::{Error as _, Unexpected};
                let s = String::deserialize(d)?;
                if is_valid_token(&s) {
                    Ok(Self(s))
                } else {
                    Err(D::Error::invalid_value(
                        Unexpected::Str(&s),
                        &"token [A-Za-z0-9_.:-], len 1..=64",
                    ))
                }
            }
        }
    };
}

token_newtype!(
    /// Contest identifier, unique within a ballot.
    ContestId, "contest"
);
token_newtype!(
    /// Candidate identifier, unique within a ballot (and therefore within its contest).
    CandidateId, "candidate"
);
