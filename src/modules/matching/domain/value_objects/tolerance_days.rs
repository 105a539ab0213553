use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::{AppError, AppResult};

/// Maximum distance, in whole days, between an anchor date and a season air
/// date for the season to count as a match. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToleranceDays(u32);

impl ToleranceDays {
    pub const DEFAULT: ToleranceDays = ToleranceDays(7);

    /// Validate a signed day count coming from configuration or the command line
    pub fn new(days: i64) -> AppResult<Self> {
        if days < 0 {
            return Err(AppError::InvalidInput(format!(
                "Tolerance must not be negative, got {} days",
                days
            )));
        }
        u32::try_from(days)
            .map(Self)
            .map_err(|_| AppError::InvalidInput(format!("Tolerance too large: {} days", days)))
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn allows(&self, difference: u32) -> bool {
        difference <= self.0
    }
}

impl Default for ToleranceDays {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for ToleranceDays {
    fn from(days: u32) -> Self {
        Self(days)
    }
}

impl fmt::Display for ToleranceDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day(s)", self.0)
    }
}
