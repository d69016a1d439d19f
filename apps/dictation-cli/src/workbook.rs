//! A workbook on disk: one tab-separated file per sheet.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dictation_core::{
    parse_sheet, plan_status_changes, rewrite_statuses, DictationError, Result, Sheet, StatusUpdate,
    StatusWriter,
};

const EXTENSION: &str = "tsv";

/// Directory of `<sheet name>.tsv` exports.
#[derive(Debug, Clone)]
pub struct TsvWorkbook {
    dir: PathBuf,
}

impl TsvWorkbook {
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        anyhow::ensure!(dir.is_dir(), "workbook directory {} does not exist", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{sheet}.{EXTENSION}"))
    }

    /// Owner file LibreOffice keeps next to a document while it is open.
    fn lock_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!(".~lock.{sheet}.{EXTENSION}#"))
    }

    pub fn is_locked(&self, sheet: &str) -> bool {
        self.lock_path(sheet).exists()
    }

    pub fn load_sheet(&self, sheet: &str) -> anyhow::Result<Sheet> {
        let path = self.sheet_path(sheet);
        let content = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(parse_sheet(sheet, &content)?)
    }

    fn write_failed(sheet: &str, err: impl std::fmt::Display) -> DictationError {
        DictationError::StatusWrite {
            sheet: sheet.to_string(),
            reason: err.to_string(),
        }
    }
}

impl StatusWriter for TsvWorkbook {
    /// Re-read the sheet, compute new statuses from what is stored now and
    /// replace only the status cells.
    fn write(&mut self, update: &StatusUpdate) -> Result<()> {
        let sheet = update.sheet_name.as_str();
        if update.is_empty() {
            tracing::debug!(sheet, "no statuses to write");
            return Ok(());
        }
        if self.is_locked(sheet) {
            return Err(DictationError::WorkbookLocked {
                path: self.sheet_path(sheet),
            });
        }

        let path = self.sheet_path(sheet);
        let content = fs::read_to_string(&path).map_err(|e| Self::write_failed(sheet, e))?;
        let current = parse_sheet(sheet, &content)?;

        let plan: BTreeMap<usize, String> = plan_status_changes(&current, update)?
            .into_iter()
            .map(|(offset, status)| (offset, status.to_string()))
            .collect();
        let rewritten = rewrite_statuses(&content, update.status_column, &plan);

        let tmp = self.dir.join(format!(".{sheet}.{EXTENSION}.tmp"));
        fs::write(&tmp, rewritten).map_err(|e| Self::write_failed(sheet, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::write_failed(sheet, e))?;

        tracing::info!(sheet, rows = plan.len(), path = %path.display(), "statuses written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use pretty_assertions::assert_eq;

    const NOUNS: &str = "word\tinfo\ttranslation\tstatus\n\
        der Hund\t\tсобака\tNEW*1\n\
        die Katze\tf\tкошка\tNORMAL*1\n\
        das Haus\t\tдом\tNEEDS_REVISION*3\n";

    fn workbook() -> (tempfile::TempDir, TsvWorkbook) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("nouns.tsv"), NOUNS).unwrap();
        let workbook = TsvWorkbook::open(dir.path()).unwrap();
        (dir, workbook)
    }

    fn update(needs_revision: &[usize], normal: &[usize]) -> StatusUpdate {
        StatusUpdate {
            sheet_name: "nouns".into(),
            status_column: 3,
            needs_revision: needs_revision.iter().copied().collect::<BTreeSet<_>>(),
            normal: normal.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn load_sheet_reads_tsv() {
        let (_dir, workbook) = workbook();
        let sheet = workbook.load_sheet("nouns").unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.cell(1, 1), "f");
        assert_eq!(sheet.cell(0, 1), "nan");
    }

    #[test]
    fn missing_sheet_names_the_file() {
        let (_dir, workbook) = workbook();
        let err = workbook.load_sheet("verbs").unwrap_err();
        assert!(err.to_string().contains("verbs.tsv"));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TsvWorkbook::open(dir.path().join("nowhere")).is_err());
    }

    #[test]
    fn write_updates_only_status_cells() {
        let (_dir, mut workbook) = workbook();
        workbook.write(&update(&[0], &[1, 2])).unwrap();

        let written = fs::read_to_string(workbook.sheet_path("nouns")).unwrap();
        assert_eq!(
            written,
            "word\tinfo\ttranslation\tstatus\n\
             der Hund\t\tсобака\tNEEDS_REVISION*2\n\
             die Katze\tf\tкошка\tNORMAL*1\n\
             das Haus\t\tдом\tNEEDS_REVISION*2\n"
        );
        assert!(!workbook.dir().join(".nouns.tsv.tmp").exists());
    }

    #[test]
    fn write_keeps_windows_line_endings() {
        let (dir, mut workbook) = workbook();
        let crlf = NOUNS.replace('\n', "\r\n");
        fs::write(dir.path().join("nouns.tsv"), &crlf).unwrap();

        workbook.write(&update(&[], &[0])).unwrap();
        let written = fs::read_to_string(workbook.sheet_path("nouns")).unwrap();
        assert_eq!(written, crlf.replace("NEW*1", "NORMAL*1"));
    }

    #[test]
    fn locked_workbook_is_left_alone() {
        let (dir, mut workbook) = workbook();
        let lock = dir.path().join(".~lock.nouns.tsv#");
        fs::write(&lock, "someone,host,2024").unwrap();

        let err = workbook.write(&update(&[], &[0])).unwrap_err();
        assert!(matches!(err, DictationError::WorkbookLocked { .. }));
        assert_eq!(fs::read_to_string(workbook.sheet_path("nouns")).unwrap(), NOUNS);

        // retry once the editor is closed
        fs::remove_file(lock).unwrap();
        workbook.write(&update(&[], &[0])).unwrap();
        let sheet = workbook.load_sheet("nouns").unwrap();
        assert_eq!(sheet.cell(0, 3), "NORMAL*1");
    }

    #[test]
    fn empty_update_does_not_touch_the_file() {
        let (_dir, mut workbook) = workbook();
        fs::remove_file(workbook.sheet_path("nouns")).unwrap();
        workbook.write(&update(&[], &[])).unwrap();
    }
}
