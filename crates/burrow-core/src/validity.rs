use crate::error::RegistryError;
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const MIN_MINUTES: u32 = 1;
/// One year.
pub const MAX_MINUTES: u32 = 525_600;
pub const DEFAULT_MINUTES: u32 = 30;

/// How long a record stays resolvable after creation, in whole minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ValidityMinutes(u32);

impl ValidityMinutes {
    pub fn new(minutes: u32) -> Result<Self, RegistryError> {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(RegistryError::InvalidValidity(format!(
                "must be between {} and {} minutes, got {}",
                MIN_MINUTES, MAX_MINUTES, minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.0))
    }
}

impl Default for ValidityMinutes {
    fn default() -> Self {
        Self(DEFAULT_MINUTES)
    }
}

impl Display for ValidityMinutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl TryFrom<u32> for ValidityMinutes {
    type Error = RegistryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ValidityMinutes> for u32 {
    fn from(value: ValidityMinutes) -> Self {
        value.0
    }
}
