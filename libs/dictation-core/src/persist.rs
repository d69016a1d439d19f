//! Writing session results back to the vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{DictationError, Result};
use crate::status::StatusCode;
use crate::transition::{self, Outcome};
use crate::types::Sheet;

/// Rows whose status should move, grouped by what the session observed.
/// Row indexes are storage offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub sheet_name: String,
    pub status_column: usize,
    pub needs_revision: BTreeSet<usize>,
    pub normal: BTreeSet<usize>,
}

impl StatusUpdate {
    pub fn is_empty(&self) -> bool {
        self.needs_revision.is_empty() && self.normal.is_empty()
    }

    /// Every row with its outcome. A row listed twice needs revision.
    pub fn outcomes(&self) -> impl Iterator<Item = (usize, Outcome)> + '_ {
        let revised = self.needs_revision.iter().map(|row| (*row, Outcome::NeedsRevision));
        let normal = self
            .normal
            .difference(&self.needs_revision)
            .map(|row| (*row, Outcome::Normal));
        revised.chain(normal)
    }
}

/// Persists a session's status update. Called once per finalisation.
pub trait StatusWriter {
    fn write(&mut self, update: &StatusUpdate) -> Result<()>;
}

impl<W: StatusWriter + ?Sized> StatusWriter for &mut W {
    fn write(&mut self, update: &StatusUpdate) -> Result<()> {
        (**self).write(update)
    }
}

impl<W: StatusWriter + ?Sized> StatusWriter for Box<W> {
    fn write(&mut self, update: &StatusUpdate) -> Result<()> {
        (**self).write(update)
    }
}

/// New status per row, computed from the statuses currently stored in `sheet`.
pub fn plan_status_changes(sheet: &Sheet, update: &StatusUpdate) -> Result<BTreeMap<usize, StatusCode>> {
    update
        .outcomes()
        .map(|(offset, outcome)| {
            if offset >= sheet.row_count() {
                return Err(DictationError::StatusWrite {
                    sheet: update.sheet_name.clone(),
                    reason: format!("row {} does not exist", Sheet::row_number(offset)),
                });
            }
            let current = StatusCode::parse(sheet.cell(offset, update.status_column)).map_err(|_| {
                DictationError::InvalidStatusFormat {
                    sheet: update.sheet_name.clone(),
                    column: update.status_column,
                    value: sheet.cell(offset, update.status_column).to_string(),
                    row: Sheet::row_number(offset),
                }
            })?;
            Ok((offset, transition::next(current, outcome)))
        })
        .collect()
}

/// Apply an update to an in-memory sheet, returning how many cells changed.
pub fn apply_to_sheet(sheet: &mut Sheet, update: &StatusUpdate) -> Result<usize> {
    let plan = plan_status_changes(sheet, update)?;
    let mut changed = 0;
    for (offset, status) in plan {
        let row = &mut sheet.rows[offset];
        if row.len() <= update.status_column {
            row.resize(update.status_column + 1, crate::answer::MISSING.to_string());
        }
        let status = status.to_string();
        if row[update.status_column] != status {
            row[update.status_column] = status;
            changed += 1;
        }
    }
    Ok(changed)
}
