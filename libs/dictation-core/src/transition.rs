//! Spaced repetition status transitions.
//!
//! Power counts the repetitions a word has to survive at its current level.
//! When it drops to zero the word is promoted to `NORMAL`; a word that keeps
//! failing accumulates power under `NEEDS_REVISION`.

use serde::{Deserialize, Serialize};

use crate::status::{StatusCode, StatusName};

/// What a finished session observed for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The answer had to be revealed at least once.
    NeedsRevision,
    /// Every check was passed without a hint.
    Normal,
}

/// Compute the status to store after a session.
///
/// | old            | outcome        | new                                       |
/// |----------------|----------------|-------------------------------------------|
/// | NEEDS_REVISION | NEEDS_REVISION | NEEDS_REVISION, power + 1                 |
/// | NEEDS_REVISION | NORMAL         | NEEDS_REVISION, power - 1, or NORMAL*1     |
/// | NORMAL         | NEEDS_REVISION | NEEDS_REVISION*2                          |
/// | NORMAL         | NORMAL         | NORMAL*1                                  |
/// | NEW            | NEEDS_REVISION | NEW unchanged if power > 1, else NEEDS_REVISION, power + 1 |
/// | NEW            | NORMAL         | NEW, power - 1, or NORMAL*1               |
///
/// `DELAYED` words are frozen and keep their status. Power saturates at
/// [`MAX_POWER`](crate::status::MAX_POWER).
pub fn next(old: StatusCode, outcome: Outcome) -> StatusCode {
    use Outcome as O;
    use StatusName as S;

    let power = old.power() as i32;
    let normal = || StatusCode::saturating(S::Normal, 1);

    match (old.name(), outcome) {
        (S::NeedsRevision, O::NeedsRevision) => StatusCode::saturating(S::NeedsRevision, power + 1),
        (S::NeedsRevision, O::Normal) => {
            if power - 1 > 0 {
                StatusCode::saturating(S::NeedsRevision, power - 1)
            } else {
                normal()
            }
        }
        (S::Normal, O::NeedsRevision) => StatusCode::saturating(S::NeedsRevision, 2),
        (S::Normal, O::Normal) => normal(),
        (S::New, O::NeedsRevision) => {
            if power > 1 {
                old
            } else {
                StatusCode::saturating(S::NeedsRevision, power + 1)
            }
        }
        (S::New, O::Normal) => {
            if power - 1 > 0 {
                StatusCode::saturating(S::New, power - 1)
            } else {
                normal()
            }
        }
        (S::Delayed, _) => old,
    }
}
