//! Core study-session library for the interview flashcards tool.
//!
//! Provides:
//! - Parser turning a structured interview-question document into a
//!   section/question model
//! - Substring search across the parsed model
//! - Review-progress tracking persisted through a key-value storage port
//! - A session coordinator with cursor navigation and search-driven jumps
//!
//! All rendering, theming, and input handling live in the presentation
//! layer, which only calls in here for data and state transitions.

pub mod error;
pub mod parser;
pub mod progress;
pub mod search;
pub mod session;
pub mod storage;
pub mod types;

pub use error::{InvalidQuestionId, Result, StorageError};
pub use parser::parse;
pub use progress::{ProgressStore, SectionProgress, StudyProgress, STORAGE_KEY};
pub use search::{search, SearchResult};
pub use session::StudySession;
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use types::{Question, QuestionBank, QuestionKey, Section};
