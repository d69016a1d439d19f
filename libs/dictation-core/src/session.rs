//! The dictation state machine.
//!
//! Rows are asked in selection order, answer set by answer set. A row whose
//! answer had to be revealed goes to a revision queue; once the live queue
//! runs dry the revision queue is shuffled and asked again, until every answer
//! set of every row has been solved or the session is stopped.
//!
//! ```text
//! Idle --run--> AwaitingAnswer <--show_answer / submit--> HintShown
//!                     |                                      |
//!                     +------ queues exhausted: Running -----+
//!                                   |
//!                   get_word: Completed      stop: Stopped
//! ```

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::answer::{AnswerSet, Feedback};
use crate::error::{DictationError, Result};
use crate::persist::{StatusUpdate, StatusWriter};
use crate::scheme::Scheme;
use crate::selector::Selection;
use crate::types::{MatchingMode, Row};

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    /// Active, but nothing is left to ask and results are not written yet.
    Running,
    AwaitingAnswer,
    /// The answer was revealed and has to be typed once.
    HintShown,
    Completed,
    Stopped,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Correct(Feedback),
    Incorrect,
    /// The revealed answer was typed. Not scored.
    Retyped(Feedback),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Incorrect)
    }
}

/// Summary for the host once a session has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub words: usize,
    pub answered: usize,
    pub mistakes: usize,
    pub hints: usize,
    pub needs_revision: BTreeSet<usize>,
    pub normal: BTreeSet<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Completed,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    slot: usize,
    set: usize,
}

/// A dictation over a selection of rows.
pub struct QuizSession<W> {
    sheet_name: String,
    status_column: usize,
    matching: MatchingMode,
    rows: Vec<(usize, Row)>,
    live: VecDeque<usize>,
    revision: Vec<usize>,
    cursor: Option<Cursor>,
    revealed_in_pass: bool,
    awaiting_hint: bool,
    needs_revision: BTreeSet<usize>,
    completed: BTreeSet<usize>,
    phase: Phase,
    writer: W,
    rng: StdRng,
    answered: usize,
    mistakes: usize,
    hints: usize,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl<W: StatusWriter> QuizSession<W> {
    pub fn new(selection: Selection, scheme: &Scheme, writer: W) -> Self {
        Self {
            sheet_name: scheme.sheet_name.clone(),
            status_column: scheme.status,
            matching: MatchingMode::default(),
            rows: selection.into_entries(),
            live: VecDeque::new(),
            revision: Vec::new(),
            cursor: None,
            revealed_in_pass: false,
            awaiting_hint: false,
            needs_revision: BTreeSet::new(),
            completed: BTreeSet::new(),
            phase: Phase::Idle,
            writer,
            rng: StdRng::from_os_rng(),
            answered: 0,
            mistakes: 0,
            hints: 0,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn with_matching(mut self, matching: MatchingMode) -> Self {
        self.matching = matching;
        self
    }

    /// Make the revision shuffles reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Completed => SessionState::Completed,
            Phase::Stopped => SessionState::Stopped,
            Phase::Active if self.cursor.is_none() => SessionState::Running,
            Phase::Active if self.awaiting_hint => SessionState::HintShown,
            Phase::Active => SessionState::AwaitingAnswer,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Start asking. Loads the first row's first answer set.
    pub fn run(&mut self) -> Result<()> {
        match self.phase {
            Phase::Idle => {}
            Phase::Active => return Ok(()),
            Phase::Completed | Phase::Stopped => return Err(DictationError::SessionNotRunning),
        }

        self.phase = Phase::Active;
        self.started_at = Some(Utc::now());
        self.live = (0..self.rows.len()).collect();
        tracing::info!(sheet = %self.sheet_name, words = self.rows.len(), "dictation started");
        self.advance();
        Ok(())
    }

    /// The answer set awaiting an answer, if any.
    pub fn current(&self) -> Option<&AnswerSet> {
        let cursor = self.cursor?;
        self.rows[cursor.slot].1.answer_sets.get(cursor.set)
    }

    /// Spreadsheet offset of the row being asked.
    pub fn current_offset(&self) -> Option<usize> {
        self.cursor.map(|c| self.rows[c.slot].0)
    }

    /// Next answer set to present. Once every queue is exhausted the results
    /// are written and `None` is returned from then on.
    pub fn get_word(&mut self) -> Result<Option<&AnswerSet>> {
        match self.phase {
            Phase::Idle => return Err(DictationError::SessionNotRunning),
            Phase::Completed | Phase::Stopped => return Ok(None),
            Phase::Active => {}
        }

        if self.cursor.is_none() {
            self.finalize(Phase::Completed)?;
            return Ok(None);
        }
        Ok(self.current())
    }

    /// Check an answer against the current answer set.
    pub fn submit(&mut self, answer: &str) -> Result<Submission> {
        let cursor = self.pending()?;
        let matching = self.matching;
        let set = &mut self.rows[cursor.slot].1.answer_sets[cursor.set];

        if self.awaiting_hint {
            return Ok(match set.preview(answer, matching) {
                Some(feedback) => {
                    self.awaiting_hint = false;
                    self.advance();
                    Submission::Retyped(feedback)
                }
                None => Submission::Incorrect,
            });
        }

        match set.check(answer, matching) {
            Some(feedback) => {
                self.answered += 1;
                if set.is_solved() {
                    self.advance();
                }
                Ok(Submission::Correct(feedback))
            }
            None => {
                self.mistakes += 1;
                Ok(Submission::Incorrect)
            }
        }
    }

    /// Reveal every remaining spelling of the current answer set. The row is
    /// queued for revision and will not count as a clean success.
    pub fn show_answer(&mut self) -> Result<String> {
        let cursor = self.pending()?;
        let offset = self.rows[cursor.slot].0;

        if !self.awaiting_hint {
            self.awaiting_hint = true;
            self.hints += 1;
            self.needs_revision.insert(offset);
            if !self.revealed_in_pass {
                self.revealed_in_pass = true;
                self.revision.push(cursor.slot);
            }
            tracing::debug!(row = offset, "answer revealed");
        }

        Ok(self.rows[cursor.slot].1.answer_sets[cursor.set].reveal())
    }

    /// Write the results and end the session. Does nothing unless running.
    ///
    /// If the write fails the error is returned and the session keeps
    /// running, so the caller may try again.
    pub fn stop(&mut self) -> Result<()> {
        if self.phase != Phase::Active {
            return Ok(());
        }
        self.finalize(Phase::Stopped)
    }

    /// Rows revised at least once, and rows solved cleanly.
    pub fn status_update(&self) -> StatusUpdate {
        StatusUpdate {
            sheet_name: self.sheet_name.clone(),
            status_column: self.status_column,
            needs_revision: self.needs_revision.clone(),
            normal: self
                .completed
                .difference(&self.needs_revision)
                .copied()
                .collect(),
        }
    }

    pub fn report(&self) -> SessionReport {
        let update = self.status_update();
        SessionReport {
            started_at: self.started_at,
            finished_at: self.finished_at,
            words: self.rows.len(),
            answered: self.answered,
            mistakes: self.mistakes,
            hints: self.hints,
            needs_revision: update.needs_revision,
            normal: update.normal,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn pending(&self) -> Result<Cursor> {
        if self.phase != Phase::Active {
            return Err(DictationError::SessionNotRunning);
        }
        self.cursor.ok_or(DictationError::NoPendingWord)
    }

    fn finalize(&mut self, end: Phase) -> Result<()> {
        let update = self.status_update();
        self.writer.write(&update)?;

        self.phase = end;
        self.finished_at = Some(Utc::now());
        tracing::info!(
            sheet = %self.sheet_name,
            needs_revision = update.needs_revision.len(),
            normal = update.normal.len(),
            completed = (end == Phase::Completed),
            "dictation finished"
        );
        Ok(())
    }

    /// Move to the next unsolved answer set, pulling rows from the live queue
    /// and refilling it from the revision queue as needed.
    fn advance(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            let sets = &self.rows[cursor.slot].1.answer_sets;
            if let Some(set) = (cursor.set + 1..sets.len()).find(|i| !sets[*i].is_solved()) {
                self.cursor = Some(Cursor { slot: cursor.slot, set });
                return;
            }
            self.close_pass(cursor.slot);
        }

        loop {
            let slot = match self.live.pop_front() {
                Some(slot) => slot,
                None if self.revision.is_empty() => return,
                None => {
                    let mut requeued = std::mem::take(&mut self.revision);
                    requeued.shuffle(&mut self.rng);
                    tracing::debug!(rows = requeued.len(), "revising rows");
                    self.live.extend(requeued);
                    continue;
                }
            };

            self.revealed_in_pass = false;
            let (offset, row) = &self.rows[slot];
            match row.answer_sets.iter().position(|s| !s.is_solved()) {
                Some(set) => {
                    tracing::debug!(row = *offset, set, "asking row");
                    self.cursor = Some(Cursor { slot, set });
                    return;
                }
                None => tracing::debug!(row = *offset, "nothing to ask, skipping row"),
            }
        }
    }

    fn close_pass(&mut self, slot: usize) {
        let (offset, row) = &self.rows[slot];
        if !self.revealed_in_pass && row.is_fully_answered() {
            self.completed.insert(*offset);
        }
    }
}
