use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::{AppError, AppResult};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Calendar date without a time component.
///
/// Absence ("unknown start date", "no air date yet") is modelled by the
/// caller as `Option<AnchorDate>`; a constructed value is always a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorDate(NaiveDate);

impl AnchorDate {
    /// Build a date from its parts, rejecting impossible dates such as 2017-02-30
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AppResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Invalid calendar date: {:04}-{:02}-{:02}",
                    year, month, day
                ))
            })
    }

    /// Build a date from the optional parts catalogs hand out.
    ///
    /// Returns `Ok(None)` when any part is missing, and an error when all parts
    /// are present but do not form a real date.
    pub fn from_parts(
        year: Option<i32>,
        month: Option<i32>,
        day: Option<i32>,
    ) -> AppResult<Option<Self>> {
        match (year, month, day) {
            (Some(year), Some(month), Some(day)) => {
                let month = u32::try_from(month).map_err(|_| {
                    AppError::InvalidInput(format!("Invalid month: {}", month))
                })?;
                let day = u32::try_from(day)
                    .map_err(|_| AppError::InvalidInput(format!("Invalid day: {}", day)))?;
                Self::from_ymd(year, month, day).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Parse an optional ISO date where blank means absent
    pub fn parse_optional(value: Option<&str>) -> AppResult<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl From<NaiveDate> for AnchorDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for AnchorDate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|e| AppError::InvalidInput(format!("Invalid date '{}': {}", s, e)))
    }
}

impl fmt::Display for AnchorDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl Serialize for AnchorDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnchorDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
