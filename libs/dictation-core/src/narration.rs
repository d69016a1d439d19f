//! Best-effort narration of correct answers.

use crate::error::{DictationError, Result};

/// Speaks a word aloud.
pub trait Narrator {
    fn narrate(&mut self, text: &str) -> Result<()>;
}

impl<N: Narrator + ?Sized> Narrator for Box<N> {
    fn narrate(&mut self, text: &str) -> Result<()> {
        (**self).narrate(text)
    }
}

/// Wraps a narrator so that a failure never interrupts a dictation.
///
/// The first failure disables narration for the rest of the session and is
/// handed back to the caller once so it can be shown; later calls do nothing.
pub struct NarrationGuard<N> {
    narrator: Option<N>,
    failure: Option<String>,
}

impl<N: Narrator> NarrationGuard<N> {
    pub fn new(narrator: N) -> Self {
        Self {
            narrator: Some(narrator),
            failure: None,
        }
    }

    /// A guard that never narrates.
    pub fn disabled() -> Self {
        Self {
            narrator: None,
            failure: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.narrator.is_some()
    }

    /// Why narration was switched off, if it failed.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Narrate `text`. Returns the error only on the call that disabled narration.
    pub fn say(&mut self, text: &str) -> Option<DictationError> {
        let narrator = self.narrator.as_mut()?;
        match narrator.narrate(text) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "narration disabled for this session");
                self.narrator = None;
                self.failure = Some(err.to_string());
                Some(match err {
                    DictationError::Narration(_) => err,
                    other => DictationError::Narration(other.to_string()),
                })
            }
        }
    }
}
