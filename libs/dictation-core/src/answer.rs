//! Checkable answers parsed from spelling and information cells.
//!
//! # Cell syntax
//! - `|` separates synonyms. Every synonym must be given.
//! - `/` separates interchangeable spellings of one synonym. Any one will do.
//!
//! `run/runs|ran` is two synonyms, the first of which has two spellings. The
//! information cell is split the same way and paired up by position.

use serde::{Deserialize, Serialize};

use crate::types::MatchingMode;

/// Cell content of an empty cell once the sheet has been read.
pub const MISSING: &str = "nan";

/// Cell content that explicitly disables a check.
pub const SKIP: &str = "n-";

const SYNONYM_SEPARATOR: char = '|';
const SPELLING_SEPARATOR: char = '/';

/// Whether a cell carries nothing to check or show.
pub fn is_blank(cell: &str) -> bool {
    matches!(cell.trim(), "" | MISSING | SKIP)
}

/// One acceptable written form with its annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spelling {
    pub text: String,
    pub info: String,
}

impl Spelling {
    /// The annotation, unless it is a sentinel.
    pub fn info(&self) -> Option<&str> {
        if is_blank(&self.info) {
            None
        } else {
            Some(self.info.as_str())
        }
    }

    fn describe(&self) -> String {
        match self.info() {
            Some(info) => format!("{} ({})", self.text, info),
            None => self.text.clone(),
        }
    }
}

/// One synonym: a set of interchangeable spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerUnit {
    spellings: Vec<Spelling>,
}

impl AnswerUnit {
    /// Build from one synonym of the spelling cell and the matching part of the
    /// information cell. Missing information is padded with empty strings.
    pub fn new(spelling: &str, info: &str) -> Self {
        let infos: Vec<&str> = info.split(SPELLING_SEPARATOR).collect();

        let spellings = spelling
            .split(SPELLING_SEPARATOR)
            .enumerate()
            .map(|(idx, text)| Spelling {
                text: text.trim().to_string(),
                info: infos.get(idx).map(|s| s.trim()).unwrap_or_default().to_string(),
            })
            .filter(|s| !s.text.is_empty())
            .collect();

        Self { spellings }
    }

    pub fn spellings(&self) -> &[Spelling] {
        &self.spellings
    }

    /// Position of the spelling that `answer` satisfies.
    pub fn find(&self, answer: &str, mode: MatchingMode) -> Option<usize> {
        self.spellings
            .iter()
            .position(|s| answers_equal(answer, &s.text, mode))
    }

    fn describe(&self) -> String {
        self.spellings
            .iter()
            .map(Spelling::describe)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// What the user learns after giving an accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// The spelling that matched.
    pub given: String,
    /// Information attached to that spelling, if any.
    pub info: Option<String>,
    /// Other spellings that would have been accepted for the same synonym.
    pub other_variations: String,
    /// Synonyms still owed for this answer set.
    pub synonyms_left: usize,
}

/// All synonyms of one test block for one row ("choice").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    translation: String,
    instructions: String,
    remaining: Vec<AnswerUnit>,
    amount_of_synonyms: usize,
    skipped: bool,
}

impl AnswerSet {
    pub fn new(translation: &str, instructions: &str, spelling_cell: &str, info_cell: &str) -> Self {
        let skipped = is_blank(spelling_cell);

        let remaining: Vec<AnswerUnit> = if skipped {
            Vec::new()
        } else {
            let infos: Vec<&str> = info_cell.split(SYNONYM_SEPARATOR).collect();
            spelling_cell
                .split(SYNONYM_SEPARATOR)
                .enumerate()
                .map(|(idx, spelling)| AnswerUnit::new(spelling, infos.get(idx).copied().unwrap_or_default()))
                .filter(|unit| !unit.spellings.is_empty())
                .collect()
        };

        Self {
            translation: translation.trim().to_string(),
            instructions: instructions.to_string(),
            amount_of_synonyms: remaining.len(),
            remaining,
            skipped,
        }
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// True when the spelling cell disabled this check, or held nothing checkable.
    pub fn is_skipped(&self) -> bool {
        self.skipped || self.amount_of_synonyms == 0
    }

    /// Number of synonyms the set was built with. Never changes.
    pub fn amount_of_synonyms(&self) -> usize {
        self.amount_of_synonyms
    }

    pub fn has_synonyms(&self) -> bool {
        self.amount_of_synonyms > 1
    }

    /// Synonyms not answered yet.
    pub fn remaining(&self) -> &[AnswerUnit] {
        &self.remaining
    }

    pub fn amount_of_words_left(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_solved(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Feedback `answer` would earn, without consuming the synonym.
    pub fn preview(&self, answer: &str, mode: MatchingMode) -> Option<Feedback> {
        let (unit_idx, spelling_idx) = self.locate(answer, mode)?;
        Some(self.feedback(unit_idx, spelling_idx, self.remaining.len()))
    }

    /// Check an answer and consume the synonym it satisfies.
    pub fn check(&mut self, answer: &str, mode: MatchingMode) -> Option<Feedback> {
        let (unit_idx, spelling_idx) = self.locate(answer, mode)?;
        let feedback = self.feedback(unit_idx, spelling_idx, self.remaining.len() - 1);
        self.remaining.remove(unit_idx);
        Some(feedback)
    }

    /// Every remaining spelling with its information, as one line.
    pub fn reveal(&self) -> String {
        self.remaining
            .iter()
            .map(AnswerUnit::describe)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn feedback(&self, unit_idx: usize, spelling_idx: usize, synonyms_left: usize) -> Feedback {
        let unit = &self.remaining[unit_idx];
        let matched = &unit.spellings[spelling_idx];

        let other_variations = unit
            .spellings
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != spelling_idx)
            .map(|(_, s)| s.describe())
            .collect::<Vec<_>>()
            .join(", ");

        Feedback {
            given: matched.text.clone(),
            info: matched.info().map(str::to_string),
            other_variations,
            synonyms_left,
        }
    }

    fn locate(&self, answer: &str, mode: MatchingMode) -> Option<(usize, usize)> {
        self.remaining
            .iter()
            .enumerate()
            .find_map(|(unit_idx, unit)| unit.find(answer, mode).map(|s| (unit_idx, s)))
    }
}

fn answers_equal(typed: &str, expected: &str, mode: MatchingMode) -> bool {
    let typed = normalize_whitespace(typed);
    let expected = normalize_whitespace(expected);
    match mode {
        MatchingMode::Exact => typed == expected,
        MatchingMode::IgnoreCase => typed.to_lowercase() == expected.to_lowercase(),
    }
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
