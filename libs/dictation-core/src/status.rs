//! Spaced repetition status stored in a sheet's status column.
//!
//! A status cell holds `"<NAME>*<power>"`, e.g. `NEEDS_REVISION*3`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DictationError, Result};

/// Lowest power a status can carry.
pub const MIN_POWER: u8 = 1;

/// Highest power a status can carry.
pub const MAX_POWER: u8 = 50;

/// Status category of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusName {
    New,
    Normal,
    NeedsRevision,
    Delayed,
}

impl StatusName {
    /// All names a status cell may carry.
    pub const ALL: [StatusName; 4] = [Self::New, Self::Normal, Self::NeedsRevision, Self::Delayed];

    /// Get the name as written in the sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Normal => "NORMAL",
            Self::NeedsRevision => "NEEDS_REVISION",
            Self::Delayed => "DELAYED",
        }
    }

    /// Parse from the sheet spelling.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Self::New),
            "NORMAL" => Some(Self::Normal),
            "NEEDS_REVISION" => Some(Self::NeedsRevision),
            "DELAYED" => Some(Self::Delayed),
            _ => None,
        }
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated status: a name and a power in `MIN_POWER..=MAX_POWER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode {
    name: StatusName,
    power: u8,
}

impl StatusCode {
    pub fn new(name: StatusName, power: u8) -> Result<Self> {
        if !(MIN_POWER..=MAX_POWER).contains(&power) {
            return Err(DictationError::InvalidStatus {
                value: format!("{}*{}", name, power),
            });
        }
        Ok(Self { name, power })
    }

    /// Build a status, clamping the power into the allowed range.
    pub fn saturating(name: StatusName, power: i32) -> Self {
        let power = power.clamp(MIN_POWER as i32, MAX_POWER as i32) as u8;
        Self { name, power }
    }

    pub fn name(&self) -> StatusName {
        self.name
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    /// Parse a raw status cell. Only the exact text [`Display`](fmt::Display)
    /// writes is accepted, so a parsed cell is written back unchanged.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || DictationError::InvalidStatus {
            value: raw.to_string(),
        };

        let (name, power) = raw.split_once('*').ok_or_else(invalid)?;
        let name = StatusName::from_name(name).ok_or_else(invalid)?;
        let canonical = !power.is_empty() && power.bytes().all(|b| b.is_ascii_digit()) && !power.starts_with('0');
        if !canonical {
            return Err(invalid());
        }
        let power = power.parse::<u8>().map_err(|_| invalid())?;
        Self::new(name, power).map_err(|_| invalid())
    }

    /// Only the name component of a raw status cell, without validating the power.
    pub fn name_of(raw: &str) -> &str {
        raw.split('*').next().unwrap_or_default()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.name, self.power)
    }
}

impl FromStr for StatusCode {
    type Err = DictationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
