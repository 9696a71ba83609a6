//! End-to-end flow over a realistic study document.

use study_core::{JsonFileStorage, KeyValueStorage, QuestionBank, StudySession, STORAGE_KEY};

const DOC: &str = "\
# Next.js Senior Interview Questions

Curated questions for self-study.

---

## 1. Rendering Fundamentals

### Q: What is SSR?
Server-side rendering: the page HTML is generated on the server per
request.

Benefits:
- Faster first paint
- SEO-friendly markup

### Q: What is hydration?
Attaching client-side event listeners to server-rendered HTML.

---

## 2. Data Fetching

### Q: How does incremental static regeneration work?
Pages are rebuilt in the background after a revalidation window expires.

```ts
export const revalidate = 60;
```

## 3. Gotchas
";

#[test]
fn parses_the_document_shape() {
    let bank = QuestionBank::parse(DOC);

    let titles: Vec<&str> = bank.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Rendering Fundamentals", "Data Fetching", "Gotchas"]
    );
    assert_eq!(bank.total_questions(), 3);

    // Trailing empty section survives; preamble prose does not.
    assert!(bank.section_by_id(3).unwrap().questions.is_empty());

    let first = &bank.sections[0].questions[0];
    assert_eq!(first.id(), "1-1");
    assert!(first.answer_markdown.starts_with("Server-side rendering"));
    assert!(first.answer_markdown.ends_with("- SEO-friendly markup"));
}

#[test]
fn reparsing_is_idempotent() {
    assert_eq!(QuestionBank::parse(DOC), QuestionBank::parse(DOC));
}

#[test]
fn search_jump_review_and_resume() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(tmp.path());

    {
        let mut session = StudySession::new(QuestionBank::parse(DOC), storage.clone());

        let results = session.search("REVALIDATION");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].section_title, "Data Fetching");

        session.jump_to(results[0].question.key);
        let current = session.current_question().unwrap().key;
        session.toggle_reviewed(current);
        assert!(session.is_reviewed(current));
        assert_eq!(session.section_progress(2).reviewed, 1);
    }

    // The progress file holds the full object under the fixed key.
    let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["reviewedQuestions"], serde_json::json!(["2-1"]));
    assert_eq!(value["lastVisitedSection"], 1);

    // A fresh session over the same storage resumes where we left off.
    let session = StudySession::new(QuestionBank::parse(DOC), storage);
    assert_eq!(session.cursor(), (1, 0));
    assert_eq!(session.current_question().unwrap().id(), "2-1");
    assert_eq!(session.total_reviewed(), 1);
}
