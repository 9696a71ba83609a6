//! Thin coordinator tying the parsed bank, search, and progress together.

use crate::progress::{ProgressStore, SectionProgress, StudyProgress};
use crate::search::SearchResult;
use crate::storage::KeyValueStorage;
use crate::types::{Question, QuestionBank, QuestionKey, Section};

/// A study session over an immutable question bank.
///
/// Holds the `(section index, question index)` cursor, restored from
/// persisted progress on construction. The stored cursor is positional and
/// is not clamped against the freshly parsed document, so after a document
/// edit it can point past the end; [`current_section`] and
/// [`current_question`] return `None` in that case and callers typically
/// fall back to [`select_section`]`(0)`.
///
/// [`current_section`]: StudySession::current_section
/// [`current_question`]: StudySession::current_question
/// [`select_section`]: StudySession::select_section
pub struct StudySession<S: KeyValueStorage> {
    bank: QuestionBank,
    store: ProgressStore<S>,
    progress: StudyProgress,
    section_index: usize,
    question_index: usize,
}

impl<S: KeyValueStorage> StudySession<S> {
    pub fn new(bank: QuestionBank, storage: S) -> Self {
        let store = ProgressStore::new(storage);
        let progress = store.load();
        let section_index = progress.last_visited_section;
        let question_index = progress.last_visited_question;
        Self {
            bank,
            store,
            progress,
            section_index,
            question_index,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn progress(&self) -> &StudyProgress {
        &self.progress
    }

    /// Current `(section index, question index)` position.
    pub fn cursor(&self) -> (usize, usize) {
        (self.section_index, self.question_index)
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.bank.sections.get(self.section_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_section()
            .and_then(|s| s.questions.get(self.question_index))
    }

    /// Advance to the next question in the current section, clamping at the
    /// section's end. No wraparound, no cross-section advance.
    pub fn next(&mut self) {
        let Some(section) = self.current_section() else {
            return;
        };
        if self.question_index + 1 < section.questions.len() {
            self.move_to(self.section_index, self.question_index + 1);
        }
    }

    /// Step back to the previous question, clamping at the section's start.
    pub fn prev(&mut self) {
        if self.question_index > 0 {
            self.move_to(self.section_index, self.question_index - 1);
        }
    }

    /// Jump to the first question of the section at `index`; out-of-range
    /// indices are a no-op.
    pub fn select_section(&mut self, index: usize) {
        if index < self.bank.sections.len() {
            self.move_to(index, 0);
        }
    }

    /// Jump to a question selected from search results, resolving its key
    /// back to positional indices. An unresolvable key is a no-op.
    pub fn jump_to(&mut self, key: QuestionKey) {
        let Some(section_index) = self
            .bank
            .sections
            .iter()
            .position(|s| s.id == key.section_id)
        else {
            return;
        };
        let Some(question_index) = self.bank.sections[section_index]
            .questions
            .iter()
            .position(|q| q.key == key)
        else {
            return;
        };
        self.move_to(section_index, question_index);
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.bank.search(query)
    }

    pub fn toggle_reviewed(&mut self, key: QuestionKey) {
        self.progress = self.store.toggle_reviewed(&self.progress, key);
    }

    pub fn is_reviewed(&self, key: QuestionKey) -> bool {
        self.progress.is_reviewed(key)
    }

    pub fn section_progress(&self, section_id: u32) -> SectionProgress {
        self.progress
            .section_progress(&self.bank.sections, section_id)
    }

    pub fn total_reviewed(&self) -> usize {
        self.progress.total_reviewed()
    }

    pub fn reset_progress(&mut self) {
        self.progress = self.store.reset();
        self.section_index = 0;
        self.question_index = 0;
    }

    fn move_to(&mut self, section_index: usize, question_index: usize) {
        self.section_index = section_index;
        self.question_index = question_index;
        self.progress = self
            .store
            .set_last_visited(&self.progress, section_index, question_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const DOC: &str = "## 1. Basics\n\
                       ### Q: What is X?\nX is Y.\n\
                       ### Q: What is Z?\nZ is W.\n\
                       ## 2. Advanced\n\
                       ### Q: Why?\nBecause.\n";

    fn session() -> StudySession<MemoryStorage> {
        StudySession::new(QuestionBank::parse(DOC), MemoryStorage::new())
    }

    #[test]
    fn starts_at_the_origin_on_first_run() {
        let session = session();
        assert_eq!(session.cursor(), (0, 0));
        assert_eq!(session.current_question().unwrap().id(), "1-1");
    }

    #[test]
    fn next_and_prev_clamp_at_section_boundaries() {
        let mut session = session();
        session.next();
        assert_eq!(session.cursor(), (0, 1));
        session.next(); // already at the last question of section 1
        assert_eq!(session.cursor(), (0, 1));
        session.prev();
        session.prev(); // already at the first question
        assert_eq!(session.cursor(), (0, 0));
    }

    #[test]
    fn select_section_resets_the_question_index() {
        let mut session = session();
        session.next();
        session.select_section(1);
        assert_eq!(session.cursor(), (1, 0));
        session.select_section(5); // out of range: no-op
        assert_eq!(session.cursor(), (1, 0));
    }

    #[test]
    fn jump_to_resolves_search_selection() {
        let mut session = session();
        let results = session.search("because");
        assert_eq!(results.len(), 1);
        session.jump_to(results[0].question.key);
        assert_eq!(session.cursor(), (1, 0));
        assert_eq!(session.current_question().unwrap().id(), "2-1");
    }

    #[test]
    fn jump_to_unknown_key_is_a_no_op() {
        let mut session = session();
        session.jump_to(QuestionKey::new(9, 1));
        session.jump_to(QuestionKey::new(1, 9));
        assert_eq!(session.cursor(), (0, 0));
    }

    #[test]
    fn cursor_is_restored_across_sessions() {
        let mut storage = MemoryStorage::new();
        {
            let mut session =
                StudySession::new(QuestionBank::parse(DOC), &mut storage);
            session.select_section(1);
            session.toggle_reviewed(QuestionKey::new(2, 1));
        }
        let session = StudySession::new(QuestionBank::parse(DOC), &mut storage);
        assert_eq!(session.cursor(), (1, 0));
        assert!(session.is_reviewed(QuestionKey::new(2, 1)));
        assert_eq!(session.total_reviewed(), 1);
    }

    #[test]
    fn stale_cursor_surfaces_as_nothing_to_show() {
        let mut storage = MemoryStorage::new();
        {
            let mut session =
                StudySession::new(QuestionBank::parse(DOC), &mut storage);
            session.select_section(1);
        }
        // The document shrank between sessions; the restored cursor points
        // past the end.
        let shrunk = QuestionBank::parse("## 1. Basics\n### Q: What is X?\nX is Y.\n");
        let mut session = StudySession::new(shrunk, &mut storage);
        assert!(session.current_section().is_none());
        assert!(session.current_question().is_none());
        session.select_section(0);
        assert_eq!(session.current_question().unwrap().id(), "1-1");
    }

    #[test]
    fn reset_returns_to_the_origin() {
        let mut session = session();
        session.select_section(1);
        session.toggle_reviewed(QuestionKey::new(2, 1));
        session.reset_progress();
        assert_eq!(session.cursor(), (0, 0));
        assert_eq!(session.total_reviewed(), 0);
    }
}
