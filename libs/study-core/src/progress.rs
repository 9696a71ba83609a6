//! Review progress tracking with whole-object persistence.
//!
//! Progress is a small value object replaced wholesale on every mutation;
//! the store persists each new value under a single fixed key and treats
//! the in-memory copy as authoritative when the port misbehaves.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;
use crate::types::{QuestionKey, Section};

/// The single key all progress is stored under.
pub const STORAGE_KEY: &str = "study-progress";

/// Which questions have been reviewed and where the user last was.
///
/// `last_visited_section` and `last_visited_question` are positional
/// indices into the parsed sequences, not entity ids; the persisted format
/// keeps them that way for compatibility with existing saved progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    pub reviewed_questions: BTreeSet<QuestionKey>,
    pub last_visited_section: usize,
    pub last_visited_question: usize,
    pub last_updated: DateTime<Utc>,
}

impl Default for StudyProgress {
    fn default() -> Self {
        Self {
            reviewed_questions: BTreeSet::new(),
            last_visited_section: 0,
            last_visited_question: 0,
            last_updated: Utc::now(),
        }
    }
}

impl StudyProgress {
    pub fn is_reviewed(&self, key: QuestionKey) -> bool {
        self.reviewed_questions.contains(&key)
    }

    pub fn total_reviewed(&self) -> usize {
        self.reviewed_questions.len()
    }

    /// Reviewed/total counts for one section. An unknown section id yields
    /// `{0, 0}` rather than an error, as does a section with no questions.
    pub fn section_progress(&self, sections: &[Section], section_id: u32) -> SectionProgress {
        let Some(section) = sections.iter().find(|s| s.id == section_id) else {
            return SectionProgress::default();
        };
        let reviewed = section
            .questions
            .iter()
            .filter(|q| self.is_reviewed(q.key))
            .count();
        SectionProgress {
            reviewed,
            total: section.questions.len(),
        }
    }
}

/// Per-section review tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub reviewed: usize,
    pub total: usize,
}

/// Progress store over a key-value storage port.
///
/// Every mutating operation returns a fresh [`StudyProgress`] and persists
/// it immediately, full-object, last write wins. Persistence is
/// best-effort: a failing port is logged and otherwise ignored.
pub struct ProgressStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load persisted progress, healing any corruption to the default.
    pub fn load(&self) -> StudyProgress {
        let stored = match self.storage.get(STORAGE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("failed to read stored progress: {e}");
                return StudyProgress::default();
            }
        };
        match stored {
            Some(value) => serde_json::from_str(&value).unwrap_or_else(|e| {
                tracing::warn!("stored progress is unreadable, starting fresh: {e}");
                StudyProgress::default()
            }),
            None => StudyProgress::default(),
        }
    }

    /// Add the question to the reviewed set if absent, remove it if present.
    pub fn toggle_reviewed(&mut self, progress: &StudyProgress, key: QuestionKey) -> StudyProgress {
        let mut next = progress.clone();
        if !next.reviewed_questions.remove(&key) {
            next.reviewed_questions.insert(key);
        }
        next.last_updated = Utc::now();
        self.persist(&next);
        next
    }

    /// Record the cursor position. Indices are not validated against any
    /// document; that coupling stays with the caller.
    pub fn set_last_visited(
        &mut self,
        progress: &StudyProgress,
        section_index: usize,
        question_index: usize,
    ) -> StudyProgress {
        let mut next = progress.clone();
        next.last_visited_section = section_index;
        next.last_visited_question = question_index;
        next.last_updated = Utc::now();
        self.persist(&next);
        next
    }

    /// Discard all progress.
    pub fn reset(&mut self) -> StudyProgress {
        let next = StudyProgress::default();
        self.persist(&next);
        next
    }

    fn persist(&mut self, progress: &StudyProgress) {
        let value = match serde_json::to_string(progress) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("failed to serialize progress: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(STORAGE_KEY, &value) {
            tracing::warn!("failed to persist progress: {e}");
        }
    }
}
