//! Column layout of a vocabulary sheet and its validation against sheet content.

use serde::{Deserialize, Serialize};

use crate::error::{DictationError, Result};
use crate::status::StatusCode;
use crate::types::Sheet;

/// One check asked for every row: where the expected spelling and its
/// information live, and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestBlock {
    pub instructions: String,
    pub spelling: usize,
    pub info: usize,
}

impl TestBlock {
    pub fn new(instructions: impl Into<String>, spelling: usize, info: usize) -> Self {
        Self {
            instructions: instructions.into(),
            spelling,
            info,
        }
    }
}

/// How one sheet stores its words. Column indexes are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScheme")]
pub struct Scheme {
    pub sheet_name: String,
    pub translation: usize,
    pub status: usize,
    pub test_blocks: Vec<TestBlock>,
}

#[derive(Deserialize)]
struct RawScheme {
    sheet_name: String,
    translation: usize,
    status: usize,
    test_blocks: Vec<TestBlock>,
}

impl TryFrom<RawScheme> for Scheme {
    type Error = DictationError;

    fn try_from(raw: RawScheme) -> Result<Self> {
        Scheme::new(raw.sheet_name, raw.translation, raw.status, raw.test_blocks)
    }
}

impl Scheme {
    /// Create a scheme. Translation, status and each block's spelling and
    /// information columns must be pairwise distinct.
    pub fn new(
        sheet_name: impl Into<String>,
        translation: usize,
        status: usize,
        test_blocks: Vec<TestBlock>,
    ) -> Result<Self> {
        let sheet_name = sheet_name.into();
        if test_blocks.is_empty() {
            return Err(DictationError::EmptyScheme { sheet: sheet_name });
        }

        for block in &test_blocks {
            let indexes = [translation, status, block.spelling, block.info];
            let distinct = indexes
                .iter()
                .enumerate()
                .all(|(i, a)| indexes[i + 1..].iter().all(|b| a != b));
            if !distinct {
                return Err(DictationError::DuplicateIndexes {
                    indexes: indexes.to_vec(),
                });
            }
        }

        Ok(Self {
            sheet_name,
            translation,
            status,
            test_blocks,
        })
    }

    /// Every configured column index.
    pub fn column_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        [self.translation, self.status]
            .into_iter()
            .chain(self.test_blocks.iter().flat_map(|b| [b.spelling, b.info]))
    }
}

/// Check that a scheme can be used with a sheet before a session is built.
///
/// Column indexes are bounded by the sheet's row count, the same bound the
/// spreadsheet front end has always applied. Afterwards every status cell is
/// parsed; the first malformed one is reported with its spreadsheet row.
pub fn validate(sheet: &Sheet, scheme: &Scheme) -> Result<()> {
    let bound = sheet.row_count();
    if let Some(index) = scheme.column_indexes().find(|index| *index >= bound) {
        return Err(DictationError::IncompatibleScheme {
            sheet: scheme.sheet_name.clone(),
            index,
            bound,
        });
    }

    for offset in 0..sheet.row_count() {
        let raw = sheet.cell(offset, scheme.status);
        if StatusCode::parse(raw).is_err() {
            return Err(DictationError::InvalidStatusFormat {
                sheet: scheme.sheet_name.clone(),
                column: scheme.status,
                value: raw.to_string(),
                row: Sheet::row_number(offset),
            });
        }
    }

    tracing::debug!(sheet = %scheme.sheet_name, rows = sheet.row_count(), "scheme is compatible with sheet");
    Ok(())
}
