use crate::alphabet::{is_vin_char, VIN_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VinError {
    #[error("VIN must be 17 characters (got {0})")]
    Length(usize),
    #[error("character {ch:?} at position {pos} is outside the VIN alphabet")]
    Character { ch: char, pos: usize },
}

/// A validated VIN: exactly 17 characters from `0-9A-HJ-NPR-Z`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vin(String);

impl Vin {
    pub fn new(s: impl Into<String>) -> Result<Self, VinError> {
        let s = s.into();
        let len = s.chars().count();
        if len != VIN_LEN {
            return Err(VinError::Length(len));
        }
        if let Some((pos, ch)) = s.chars().enumerate().find(|&(_, c)| !is_vin_char(c)) {
            return Err(VinError::Character { ch, pos });
        }
        Ok(Self(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// World Manufacturer Identifier, positions 1-3.
    pub fn wmi(&self) -> &str {
        &self.0[..3]
    }

    /// Vehicle Descriptor Section, positions 4-9 (check character included).
    pub fn vds(&self) -> &str {
        &self.0[3..9]
    }

    /// Vehicle Identifier Section, positions 10-17.
    pub fn vis(&self) -> &str {
        &self.0[9..]
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Vin {
    type Err = VinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vin::new(s)
    }
}

impl TryFrom<String> for Vin {
    type Error = VinError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Vin::new(s)
    }
}

impl From<Vin> for String {
    fn from(v: Vin) -> String {
        v.0
    }
}
