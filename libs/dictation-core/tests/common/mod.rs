//! Shared fixtures for dictation-core integration tests.

#![allow(dead_code)]

use dictation_core::{
    apply_to_sheet, parse_sheet, QuizSession, Result, Scheme, Sheet, StatusUpdate, StatusWriter,
    Submission, TestBlock,
};

/// Irregular verbs export: three forms, a translation and a status per row.
/// Eight data rows so that every column index of the scheme is in range.
pub const VERBS_TSV: &str = "\
infinitive\tinfinitive info\tpast\tpast info\tparticiple\tparticiple info\ttranslation\tstatus
gehen\t\tging\t\tgegangen\tmit sein\tидти\tNEW*1
sehen\t\tsah|sahen\tsingular|plural\tgesehen\t\tвидеть\tNORMAL*3
laufen\t\tlief\t\tgelaufen\tmit sein\tбежать\tNEEDS_REVISION*2
sein\t\twar\t\tgewesen\tmit sein\tбыть\tNEW*2
haben\t\thatte\t\tgehabt\t\tиметь\tDELAYED*1
kommen\t\tkam\t\tgekommen\tmit sein\tприходить\tNEW*1
fahren\t\tfuhr\t\tgefahren/gefahrn\tmit sein/colloquial\tехать\tNORMAL*1
lesen\t\tlas\t\tn-\t\tчитать\tNEW*3
";

pub const STATUS_COLUMN: usize = 7;

pub fn verbs_sheet() -> Sheet {
    parse_sheet("IrregularVerbs", VERBS_TSV).expect("fixture parses")
}

pub fn verbs_scheme() -> Scheme {
    Scheme::new(
        "IrregularVerbs",
        6,
        STATUS_COLUMN,
        vec![
            TestBlock::new("Type the infinitive", 0, 1),
            TestBlock::new("Type the past tense", 2, 3),
            TestBlock::new("Type the participle", 4, 5),
        ],
    )
    .expect("fixture scheme is valid")
}

/// Applies every write to an in-memory copy of the sheet.
pub struct MemoryWorkbook {
    pub sheet: Sheet,
    pub updates: Vec<StatusUpdate>,
}

impl MemoryWorkbook {
    pub fn new(sheet: Sheet) -> Self {
        Self {
            sheet,
            updates: Vec::new(),
        }
    }

    pub fn status(&self, offset: usize) -> &str {
        self.sheet.cell(offset, STATUS_COLUMN)
    }
}

impl StatusWriter for MemoryWorkbook {
    fn write(&mut self, update: &StatusUpdate) -> Result<()> {
        apply_to_sheet(&mut self.sheet, update)?;
        self.updates.push(update.clone());
        Ok(())
    }
}

/// Answer every prompt with its first remaining spelling until the session
/// runs out of words. Returns how many answers were given.
pub fn answer_everything<W: StatusWriter>(session: &mut QuizSession<W>) -> usize {
    let mut given = 0;
    while let Some(word) = session.get_word().expect("get_word") {
        let answer = word.remaining()[0].spellings()[0].text.clone();
        let result = session.submit(&answer).expect("submit");
        assert!(matches!(result, Submission::Correct(_)), "{answer} was rejected");
        given += 1;
    }
    given
}
