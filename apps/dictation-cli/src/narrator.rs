//! Reading answers aloud through espeak-ng.

use std::process::{Child, Command, Stdio};

use dictation_core::{DictationError, Narrator, Result};

/// Starts the synthesiser for every word and lets it run in the background.
pub struct Espeak {
    program: String,
    language: String,
    running: Vec<Child>,
}

impl Espeak {
    pub fn new(language: impl Into<String>) -> Self {
        Self::with_program("espeak-ng", language)
    }

    pub fn with_program(program: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            language: language.into(),
            running: Vec::new(),
        }
    }

    /// `--` ends option parsing, so entries such as `-en` are spoken.
    fn command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-v", &self.language, "--", text])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    /// Drop finished processes so they do not linger as zombies.
    fn reap(&mut self) {
        self.running.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl Narrator for Espeak {
    fn narrate(&mut self, text: &str) -> Result<()> {
        self.reap();
        let child = self
            .command(text)
            .spawn()
            .map_err(|e| DictationError::Narration(format!("cannot start {}: {e}", self.program)))?;
        self.running.push(child);
        Ok(())
    }
}
