use super::*;

#[test]
fn transcript_starts_empty() {
    let transcript = Transcript::new();
    assert!(transcript.is_empty());
    assert_eq!(transcript.len(), 0);
    assert_eq!(transcript.history_json(), serde_json::json!([]));
}

#[test]
fn transcript_preserves_input_order() {
    let mut transcript = Transcript::new();
    transcript.push_user("first question");
    transcript.push_assistant("first answer");
    transcript.push_user("second question");

    let messages = transcript.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "first question");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[2].content, "second question");
}

#[test]
fn pushes_only_append() {
    let mut transcript = Transcript::new();
    transcript.push_user("a");
    transcript.push_assistant("b");
    let before: Vec<String> = transcript.messages().iter().map(|m| m.content.clone()).collect();

    transcript.push_user("c");
    let after: Vec<String> = transcript.messages().iter().map(|m| m.content.clone()).collect();
    assert_eq!(after[..2], before[..]);
    assert_eq!(after.last().map(String::as_str), Some("c"));
}

#[test]
fn clear_empties_the_transcript() {
    let mut transcript = Transcript::new();
    transcript.push_user("a");
    transcript.push_assistant("b");
    transcript.clear();
    assert!(transcript.is_empty());
}

#[test]
fn history_json_uses_wire_roles() {
    let mut transcript = Transcript::new();
    transcript.push_user("q");
    transcript.push_assistant("a");

    let history = transcript.history_json();
    let entries = history.as_array().unwrap();
    assert_eq!(entries[0].get("role").and_then(serde_json::Value::as_str), Some("user"));
    assert_eq!(entries[0].get("content").and_then(serde_json::Value::as_str), Some("q"));
    assert_eq!(entries[1].get("role").and_then(serde_json::Value::as_str), Some("assistant"));
}
