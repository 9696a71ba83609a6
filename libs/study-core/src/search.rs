//! Substring search across the parsed question bank.

use serde::Serialize;

use crate::types::{Question, Section};

/// A matching question paired with its owning section's title.
///
/// The title is denormalized for display and recomputed on every call;
/// nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub question: Question,
    pub section_title: String,
}

/// Case-insensitive substring search over question text and answer bodies.
///
/// A whitespace-only query yields no results. Matches keep document order
/// (section order, then question order within the section); there is no
/// ranking.
pub fn search(sections: &[Section], query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    sections
        .iter()
        .flat_map(|section| {
            section
                .questions
                .iter()
                .filter(|q| {
                    q.question.to_lowercase().contains(&needle)
                        || q.answer_markdown.to_lowercase().contains(&needle)
                })
                .map(|q| SearchResult {
                    question: q.clone(),
                    section_title: section.title.clone(),
                })
        })
        .collect()
}
