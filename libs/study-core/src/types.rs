//! Core model types for the study session.
//!
//! The model is produced once per process by the parser and is immutable
//! afterwards, so it can be shared freely between search, progress
//! aggregation, and the presentation layer.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidQuestionId;
use crate::parser;
use crate::search::{self, SearchResult};

/// Structured identity of a question: the owning section's id plus the
/// question's 1-based ordinal within that section.
///
/// The external string form is `"<sectionId>-<ordinal>"` (e.g. `"3-7"`);
/// it is produced and parsed only at the persistence and display boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionKey {
    pub section_id: u32,
    pub ordinal: u32,
}

impl QuestionKey {
    pub fn new(section_id: u32, ordinal: u32) -> Self {
        Self {
            section_id,
            ordinal,
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section_id, self.ordinal)
    }
}

impl FromStr for QuestionKey {
    type Err = InvalidQuestionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (section, ordinal) = s
            .split_once('-')
            .ok_or_else(|| InvalidQuestionId(s.to_string()))?;
        let section_id = section
            .parse::<u32>()
            .map_err(|_| InvalidQuestionId(s.to_string()))?;
        let ordinal = ordinal
            .parse::<u32>()
            .map_err(|_| InvalidQuestionId(s.to_string()))?;
        Ok(Self::new(section_id, ordinal))
    }
}

// Persisted and displayed as the `"<sectionId>-<ordinal>"` string, keeping
// the stored progress format compatible with the structured key.
impl Serialize for QuestionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One study item: a prompt plus its raw (unrendered) markdown answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: QuestionKey,
    pub question: String,
    pub answer_markdown: String,
}

impl Question {
    /// The external string id, `"<sectionId>-<ordinal>"`.
    pub fn id(&self) -> String {
        self.key.to_string()
    }

    pub fn section_id(&self) -> u32 {
        self.key.section_id
    }
}

/// A numbered topic grouping of questions, in document order.
///
/// A section may legally contain zero questions; downstream aggregation
/// must tolerate that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: u32,
    pub title: String,
    pub questions: Vec<Question>,
}

/// The read-only parsed model: all sections in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    pub sections: Vec<Section>,
}

impl QuestionBank {
    /// Parse a raw study document into a bank.
    pub fn parse(raw: &str) -> Self {
        Self {
            sections: parser::parse(raw),
        }
    }

    /// All questions across sections, in document order.
    pub fn all_questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// An empty bank (zero sections) is the one state callers must decline
    /// to render a session for.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_by_id(&self, id: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Substring search over the bank; see [`crate::search::search`].
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search::search(&self.sections, query)
    }
}
