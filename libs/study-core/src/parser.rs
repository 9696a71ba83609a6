//! Line-oriented parser for the study document.
//!
//! # Format
//! ```markdown
//! ## 1. Fundamentals
//! ### Q: What is hydration?
//! Attaching event listeners to server-rendered HTML.
//!
//! ### Q: What is SSR?
//! Rendering the page on the server per request.
//! ```
//!
//! Two heading shapes are recognized, both anchored at the start of a line:
//! `## <digits>. <title>` opens a section and `### Q: <text>` opens a
//! question. Everything between a question heading and the next heading is
//! that question's answer body. Parsing never fails; malformed headings are
//! treated as ordinary prose and text outside any question is dropped.

use crate::types::{Question, QuestionKey, Section};

/// Parse raw document text into sections, in document order.
pub fn parse(raw: &str) -> Vec<Section> {
    let mut scanner = Scanner::default();
    for line in raw.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind<'a> {
    SectionHeading { id: u32, title: &'a str },
    QuestionHeading(&'a str),
    Rule,
    Body(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix("## ") {
        if let Some((digits, title)) = rest.split_once(". ") {
            if !digits.is_empty()
                && !title.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
            {
                if let Ok(id) = digits.parse::<u32>() {
                    return LineKind::SectionHeading { id, title };
                }
            }
        }
    }

    if let Some(text) = line.strip_prefix("### Q: ") {
        if !text.is_empty() {
            return LineKind::QuestionHeading(text);
        }
    }

    if let Some(rest) = line.strip_prefix("---") {
        if rest.chars().all(char::is_whitespace) {
            return LineKind::Rule;
        }
    }

    LineKind::Body(line)
}

/// Scanner state: before any section, inside a section between questions,
/// or accumulating an answer body.
#[derive(Debug, Default)]
enum State {
    #[default]
    Outside,
    InSection(Section),
    InQuestion {
        section: Section,
        question: Question,
        body: Vec<String>,
    },
}

#[derive(Debug, Default)]
struct Scanner {
    sections: Vec<Section>,
    state: State,
}

impl Scanner {
    fn feed(&mut self, line: &str) {
        match classify(line) {
            LineKind::SectionHeading { id, title } => self.open_section(id, title),
            LineKind::QuestionHeading(text) => self.open_question(text),
            // A divider between sections is decoration; inside an answer it
            // may be meaningful formatting and is kept verbatim.
            LineKind::Rule => self.push_body(line),
            LineKind::Body(_) => self.push_body(line),
        }
    }

    fn open_section(&mut self, id: u32, title: &str) {
        self.flush_section();
        self.state = State::InSection(Section {
            id,
            title: title.to_string(),
            questions: Vec::new(),
        });
    }

    fn open_question(&mut self, text: &str) {
        self.state = match std::mem::take(&mut self.state) {
            // No section open: the heading is front-matter prose with no
            // question to attach to, so it is dropped.
            State::Outside => State::Outside,
            State::InSection(section) => start_question(section, text),
            State::InQuestion {
                section,
                question,
                body,
            } => start_question(close_question(section, question, body), text),
        };
    }

    fn push_body(&mut self, line: &str) {
        if let State::InQuestion { body, .. } = &mut self.state {
            body.push(line.to_string());
        }
    }

    fn flush_section(&mut self) {
        match std::mem::take(&mut self.state) {
            State::Outside => {}
            State::InSection(section) => self.sections.push(section),
            State::InQuestion {
                section,
                question,
                body,
            } => self.sections.push(close_question(section, question, body)),
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush_section();
        self.sections
    }
}

fn start_question(section: Section, text: &str) -> State {
    let key = QuestionKey::new(section.id, section.questions.len() as u32 + 1);
    State::InQuestion {
        section,
        question: Question {
            key,
            question: text.to_string(),
            answer_markdown: String::new(),
        },
        body: Vec::new(),
    }
}

fn close_question(mut section: Section, mut question: Question, body: Vec<String>) -> Section {
    question.answer_markdown = body.join("\n").trim().to_string();
    section.questions.push(question);
    section
}
