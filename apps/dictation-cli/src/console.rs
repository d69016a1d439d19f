//! Interactive dictation on a terminal.

use std::io::{BufRead, Write};

use anyhow::Context;
use dictation_core::{
    ErrorKind, Feedback, NarrationGuard, Narrator, QuizSession, Result as DictationResult, StatusWriter,
    Submission,
};

pub const HINT: &str = ":hint";
pub const STOP: &str = ":stop";
const QUIT: &str = ":quit";

/// What to show for the word being asked.
struct Prompt {
    translation: String,
    instructions: String,
    words_left: Option<usize>,
}

/// Drives a session from `input` until it completes, is stopped, or input ends.
pub struct Console<R, O, N> {
    input: R,
    output: O,
    narration: NarrationGuard<N>,
}

impl<R: BufRead, O: Write, N: Narrator> Console<R, O, N> {
    pub fn new(input: R, output: O, narration: NarrationGuard<N>) -> Self {
        Self {
            input,
            output,
            narration,
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    pub fn dictate<W: StatusWriter>(&mut self, session: &mut QuizSession<W>) -> anyhow::Result<()> {
        session.run()?;
        writeln!(self.output, "Type `{HINT}` to see the answer, `{STOP}` to finish early.")?;

        loop {
            let prompt = match self.retrying(session, |s| s.get_word().map(|w| w.map(prompt_for)))? {
                Some(prompt) => prompt,
                None => break,
            };

            writeln!(self.output)?;
            writeln!(self.output, "{}", prompt.translation)?;
            match prompt.words_left {
                Some(left) => writeln!(self.output, "{} ({left} words left)", prompt.instructions)?,
                None => writeln!(self.output, "{}", prompt.instructions)?,
            }
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                self.retrying(session, |s| s.stop())?;
                break;
            };

            match line.as_str() {
                STOP => {
                    self.retrying(session, |s| s.stop())?;
                    break;
                }
                HINT => {
                    let answer = session.show_answer()?;
                    writeln!(self.output, "Answer: {answer}")?;
                    writeln!(self.output, "Type it to continue.")?;
                }
                answer => match session.submit(answer)? {
                    Submission::Correct(feedback) => self.praise(&feedback, true)?,
                    Submission::Retyped(feedback) => self.praise(&feedback, false)?,
                    Submission::Incorrect => writeln!(self.output, "Wrong. Try again or type `{HINT}`.")?,
                },
            }
        }

        Ok(())
    }

    /// Only scored answers are read aloud.
    fn praise(&mut self, feedback: &Feedback, narrate: bool) -> anyhow::Result<()> {
        match &feedback.info {
            Some(info) => writeln!(self.output, "Correct: {} ({info})", feedback.given)?,
            None => writeln!(self.output, "Correct: {}", feedback.given)?,
        }
        if !feedback.other_variations.is_empty() {
            writeln!(self.output, "Also accepted: {}", feedback.other_variations)?;
        }
        if !narrate {
            return Ok(());
        }
        if let Some(err) = self.narration.say(&feedback.given) {
            writeln!(self.output, "{err}; continuing without narration")?;
        }
        Ok(())
    }

    /// Run a step that may write statuses. While the workbook cannot be
    /// written the user may retry or give up.
    fn retrying<W, T>(
        &mut self,
        session: &mut QuizSession<W>,
        mut step: impl FnMut(&mut QuizSession<W>) -> DictationResult<T>,
    ) -> anyhow::Result<T>
    where
        W: StatusWriter,
    {
        loop {
            let err = match step(session) {
                Ok(value) => return Ok(value),
                Err(err) if err.kind() == ErrorKind::Runtime => err,
                Err(err) => return Err(err.into()),
            };

            writeln!(self.output, "{err}")?;
            write!(self.output, "Press Enter to retry or type `{QUIT}` to discard the results: ")?;
            self.output.flush()?;
            match self.read_line()? {
                Some(line) if line != QUIT => continue,
                _ => return Err(err).context("statuses were not saved"),
            }
        }
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn prompt_for(word: &dictation_core::AnswerSet) -> Prompt {
    Prompt {
        translation: word.translation().to_string(),
        instructions: word.instructions().to_string(),
        words_left: word.has_synonyms().then(|| word.amount_of_words_left()),
    }
}
