use docqa_engine::{
    parse_answer, parse_history, parse_service_error, CitationPayload, FailureKind,
};
use pretty_assertions::assert_eq;

#[test]
fn history_keeps_only_objects_with_content_in_order() {
    let body = br#"{"chat_history": ["x", {"content": "a"}, {"content": ""}, {"foo": 1}, {"content": "b"}]}"#;

    assert_eq!(parse_history(body).unwrap(), vec!["a", "b"]);
}

#[test]
fn history_drops_non_string_content() {
    let body = br#"{"chat_history": [{"content": null}, {"content": 3}, {"content": "q", "type": "human"}, 42, null]}"#;

    assert_eq!(parse_history(body).unwrap(), vec!["q"]);
}

#[test]
fn empty_history_is_ok() {
    assert!(parse_history(br#"{"chat_history": []}"#).unwrap().is_empty());
}

#[test]
fn history_without_array_is_malformed() {
    let err = parse_history(br#"{"messages": []}"#).unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);

    let err = parse_history(b"<html>oops</html>").unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[test]
fn answer_with_citations() {
    let body = br#"{"response": "Paris", "citations": [{"page": "3", "content": "Capital of France"}]}"#;
    let answer = parse_answer(body).unwrap();

    assert_eq!(answer.response, "Paris");
    assert_eq!(
        answer.citations,
        vec![CitationPayload {
            page: "3".to_string(),
            content: "Capital of France".to_string(),
        }]
    );
}

#[test]
fn numeric_and_unknown_pages_become_text() {
    let body = br#"{"response": "r", "citations": [{"page": 7, "content": "a"}, {"page": "Unknown", "content": "b"}]}"#;
    let pages: Vec<_> = parse_answer(body)
        .unwrap()
        .citations
        .into_iter()
        .map(|c| c.page)
        .collect();

    assert_eq!(pages, vec!["7", "Unknown"]);
}

#[test]
fn missing_or_null_page_reads_as_unknown() {
    let body = br#"{"response": "r", "citations": [{"content": "a"}, {"page": null, "content": "b"}, {"page": 2, "content": "c"}]}"#;
    let answer = parse_answer(body).unwrap();

    let pages: Vec<_> = answer.citations.iter().map(|c| c.page.as_str()).collect();
    assert_eq!(pages, vec!["Unknown", "Unknown", "2"]);
    assert_eq!(answer.citations[1].content, "b");
}

#[test]
fn missing_or_null_citations_are_empty() {
    assert!(parse_answer(br#"{"response": "r"}"#)
        .unwrap()
        .citations
        .is_empty());
    assert!(parse_answer(br#"{"response": "r", "citations": null}"#)
        .unwrap()
        .citations
        .is_empty());
}

#[test]
fn answer_without_response_is_malformed() {
    let err = parse_answer(br#"{"citations": []}"#).unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[test]
fn service_error_field_is_extracted() {
    assert_eq!(
        parse_service_error(br#"{"error": "index not built"}"#),
        Some("index not built".to_string())
    );
    assert_eq!(parse_service_error(br#"{"detail": "nope"}"#), None);
    assert_eq!(parse_service_error(br#"{"error": null}"#), None);
    assert_eq!(parse_service_error(b""), None);
}
