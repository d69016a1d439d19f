//! Core types for dictation sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::{AnswerSet, MISSING};
use crate::error::Result;
use crate::scheme::Scheme;
use crate::status::{StatusCode, StatusName};

/// Spreadsheet row number of the first data row (row 1 holds the column labels).
pub const FIRST_DATA_ROW: usize = 2;

/// How typed answers are compared with the expected spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    IgnoreCase,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Exact
    }
}

/// Which words a dictation should ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFilter {
    /// Every word that is not delayed.
    All,
    /// Words whose status has exactly this name.
    Status(StatusName),
}

impl Default for TargetFilter {
    fn default() -> Self {
        Self::Status(StatusName::New)
    }
}

impl TargetFilter {
    /// Whether a raw status cell passes. Only the name is compared.
    pub fn accepts(&self, raw_status: &str) -> bool {
        let name = StatusName::from_name(StatusCode::name_of(raw_status));
        match self {
            Self::All => matches!(
                name,
                Some(StatusName::New | StatusName::Normal | StatusName::NeedsRevision)
            ),
            Self::Status(target) => name == Some(*target),
        }
    }

    /// Parse the short names used on the command line.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Some(Self::All),
            "new" => Some(Self::Status(StatusName::New)),
            "normal" => Some(Self::Status(StatusName::Normal)),
            "needs_revision" => Some(Self::Status(StatusName::NeedsRevision)),
            _ => None,
        }
    }
}

impl fmt::Display for TargetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Status(name) => write!(f, "{}", name),
        }
    }
}

/// Content of one worksheet: column labels plus string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or the missing-cell sentinel past the end of a short row.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or(MISSING)
    }

    /// Spreadsheet row number a storage offset is shown at.
    pub fn row_number(offset: usize) -> usize {
        offset + FIRST_DATA_ROW
    }
}

/// One vocabulary entry to be asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub translation: String,
    pub status: StatusCode,
    pub answer_sets: Vec<AnswerSet>,
}

impl Row {
    /// Build the row at `offset`, one answer set per test block. Skipped
    /// checks are dropped.
    pub fn from_sheet(sheet: &Sheet, scheme: &Scheme, offset: usize) -> Result<Self> {
        let translation = sheet.cell(offset, scheme.translation);
        let status = StatusCode::parse(sheet.cell(offset, scheme.status))?;

        let answer_sets = scheme
            .test_blocks
            .iter()
            .map(|block| {
                AnswerSet::new(
                    translation,
                    &block.instructions,
                    sheet.cell(offset, block.spelling),
                    sheet.cell(offset, block.info),
                )
            })
            .filter(|set| !set.is_skipped())
            .collect();

        Ok(Self {
            translation: translation.trim().to_string(),
            status,
            answer_sets,
        })
    }

    pub fn is_fully_answered(&self) -> bool {
        self.answer_sets.iter().all(AnswerSet::is_solved)
    }
}
