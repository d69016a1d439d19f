//! Choosing the words a dictation will ask.

use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DictationError, Result};
use crate::scheme::Scheme;
use crate::types::{Row, Sheet, TargetFilter, FIRST_DATA_ROW};

/// Rows as numbered in the spreadsheet: 1-based, both ends inclusive, the
/// first data row is row 2. Storage offset = row number - 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub first: usize,
    pub last: usize,
}

impl RowRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Every data row of the sheet.
    pub fn all(sheet: &Sheet) -> Self {
        Self {
            first: FIRST_DATA_ROW,
            last: Sheet::row_number(sheet.row_count().saturating_sub(1)),
        }
    }

    /// Fail unless the range lies within the sheet's data rows.
    pub fn check_within(&self, sheet: &Sheet) -> Result<()> {
        let max = Self::all(sheet).last;
        if self.first < FIRST_DATA_ROW || self.first > self.last || self.last > max {
            return Err(DictationError::InvalidRange {
                first: self.first,
                last: self.last,
                min: FIRST_DATA_ROW,
                max,
            });
        }
        Ok(())
    }

    /// Half-open window of storage offsets.
    pub fn offsets(&self) -> Range<usize> {
        let start = self.first.saturating_sub(FIRST_DATA_ROW);
        let end = (self.last + 1).saturating_sub(FIRST_DATA_ROW);
        start..end.max(start)
    }
}

/// Words picked for a session, keyed by their storage offset in the sheet.
///
/// The order is the order the session will ask them in; the offsets stay
/// attached through any shuffle so statuses can be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<(usize, Row)>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(offset, _)| *offset)
    }

    pub fn get(&self, offset: usize) -> Option<&Row> {
        self.entries
            .iter()
            .find(|(o, _)| *o == offset)
            .map(|(_, row)| row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, Row)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(usize, Row)> {
        self.entries
    }
}

/// Filter the sheet's rows in `range` by status and build their rows.
///
/// Offsets past the end of the sheet are ignored. Fails with `NoWordsMatch`
/// when nothing passes; a session is never built from an empty selection.
pub fn select<R: Rng + ?Sized>(
    sheet: &Sheet,
    scheme: &Scheme,
    range: RowRange,
    target: TargetFilter,
    shuffle: bool,
    rng: &mut R,
) -> Result<Selection> {
    let window = range.offsets();
    let end = window.end.min(sheet.row_count());

    let mut entries = Vec::new();
    for offset in window.start..end {
        if target.accepts(sheet.cell(offset, scheme.status)) {
            entries.push((offset, Row::from_sheet(sheet, scheme, offset)?));
        }
    }

    if entries.is_empty() {
        return Err(DictationError::NoWordsMatch {
            filter: target.to_string(),
            first: range.first,
            last: range.last,
        });
    }

    if shuffle {
        entries.shuffle(rng);
    }

    tracing::info!(
        sheet = %sheet.name,
        selected = entries.len(),
        filter = %target,
        "selected words"
    );
    Ok(Selection { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::TestBlock;
    use crate::status::StatusName;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scheme() -> Scheme {
        Scheme::new("other", 2, 3, vec![TestBlock::new("Type the word", 0, 1)]).unwrap()
    }

    fn sheet(statuses: &[&str]) -> Sheet {
        let rows = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| vec![format!("w{i}"), "nan".into(), format!("t{i}"), s.to_string()])
            .collect();
        Sheet::new("other", vec!["w".into(), "i".into(), "t".into(), "s".into()], rows)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn range_maps_row_numbers_to_offsets() {
        assert_eq!(RowRange::new(2, 2).offsets(), 0..1);
        assert_eq!(RowRange::new(5, 9).offsets(), 3..8);
    }

    #[test]
    fn range_all_covers_every_row() {
        let sheet = sheet(&["NEW*1"; 4]);
        let range = RowRange::all(&sheet);
        assert_eq!(range, RowRange::new(2, 5));
        assert_eq!(range.offsets(), 0..4);
        assert!(range.check_within(&sheet).is_ok());
    }

    #[test]
    fn range_outside_sheet_is_rejected() {
        let sheet = sheet(&["NEW*1"; 4]);
        for range in [RowRange::new(1, 3), RowRange::new(4, 3), RowRange::new(2, 6)] {
            let err = range.check_within(&sheet).unwrap_err();
            assert!(matches!(err, DictationError::InvalidRange { min: 2, max: 5, .. }));
        }
    }

    #[test]
    fn filter_keeps_original_offsets() {
        let sheet = sheet(&["NORMAL*1", "NORMAL*1", "NORMAL*1", "NEW*1", "NORMAL*1"]);
        let target = TargetFilter::Status(StatusName::New);

        let selection = select(&sheet, &scheme(), RowRange::all(&sheet), target, false, &mut rng()).unwrap();
        assert_eq!(selection.offsets().collect::<Vec<_>>(), vec![3]);
        assert_eq!(selection.get(3).unwrap().translation, "t3");
    }

    #[test]
    fn filter_ignores_power() {
        let sheet = sheet(&["NEEDS_REVISION*1", "NEEDS_REVISION*7", "NEW*2"]);
        let target = TargetFilter::Status(StatusName::NeedsRevision);
        let selection = select(&sheet, &scheme(), RowRange::all(&sheet), target, false, &mut rng()).unwrap();
        assert_eq!(selection.offsets().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn range_limits_selection() {
        let sheet = sheet(&["NEW*1"; 6]);
        let selection = select(&sheet, &scheme(), RowRange::new(3, 5), TargetFilter::All, false, &mut rng()).unwrap();
        assert_eq!(selection.offsets().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn shuffle_preserves_keys() {
        let sheet = sheet(&["NEW*1"; 12]);
        let selection = select(&sheet, &scheme(), RowRange::all(&sheet), TargetFilter::All, true, &mut rng()).unwrap();

        let mut offsets: Vec<usize> = selection.offsets().collect();
        for (offset, row) in selection.iter() {
            assert_eq!(row.translation, format!("t{offset}"));
        }
        offsets.sort_unstable();
        assert_eq!(offsets, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn empty_selection_is_an_error() {
        let sheet = sheet(&["NORMAL*1", "DELAYED*3"]);
        let err = select(
            &sheet,
            &scheme(),
            RowRange::all(&sheet),
            TargetFilter::Status(StatusName::New),
            true,
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, DictationError::NoWordsMatch { first: 2, last: 3, .. }));
        assert_eq!(err.to_string(), "no words with status NEW in rows 2..=3");
    }

    #[test]
    fn delayed_words_are_never_selected() {
        let sheet = sheet(&["DELAYED*1", "NEW*1"]);
        let selection = select(&sheet, &scheme(), RowRange::all(&sheet), TargetFilter::All, false, &mut rng()).unwrap();
        assert_eq!(selection.offsets().collect::<Vec<_>>(), vec![1]);
    }
}
