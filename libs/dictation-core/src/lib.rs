//! Core dictation library shared by the dictation front ends.
//!
//! Provides:
//! - Status codes and the spaced repetition status transition table
//! - Answer parsing with synonym (`|`) and spelling variant (`/`) syntax
//! - Sheet schemes and their validation against sheet content
//! - Word selection by status and row range
//! - The dictation session state machine
//! - Settings, narration guard and status write planning for hosts

pub mod answer;
pub mod error;
pub mod narration;
pub mod parser;
pub mod persist;
pub mod scheme;
pub mod selector;
pub mod session;
pub mod settings;
pub mod status;
pub mod transition;
pub mod types;

pub use answer::{is_blank, AnswerSet, AnswerUnit, Feedback, Spelling};
pub use error::{DictationError, ErrorKind, Result};
pub use narration::{NarrationGuard, Narrator};
pub use parser::{parse_sheet, rewrite_statuses};
pub use persist::{apply_to_sheet, plan_status_changes, StatusUpdate, StatusWriter};
pub use scheme::{validate, Scheme, TestBlock};
pub use selector::{select, RowRange, Selection};
pub use session::{QuizSession, SessionReport, SessionState, Submission};
pub use settings::{NarrationSettings, Settings};
pub use status::{StatusCode, StatusName};
pub use transition::Outcome;
pub use types::{MatchingMode, Row, Sheet, TargetFilter};
