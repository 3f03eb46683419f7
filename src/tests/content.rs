use super::{ContentStore, TOPIC_SOURCES};
use crate::error::ContentError;
use crate::section::Method;

#[test]
fn test_builtin_store_loads_every_topic() {
    let store = ContentStore::builtin().unwrap();
    assert_eq!(store.len(), TOPIC_SOURCES.len());
    assert_eq!(store.len(), 14);
    for (id, _) in TOPIC_SOURCES {
        assert!(store.contains(id), "missing topic {id}");
    }
}

#[test]
fn test_every_document_has_a_named_section() {
    let store = ContentStore::builtin().unwrap();
    for id in store.topic_ids() {
        let doc = store.lookup(id).unwrap();
        assert!(!doc.title.is_empty(), "{id} has no title");
        assert!(!doc.sections.is_empty(), "{id} has no sections");
        assert!(
            doc.sections.iter().any(|s| !s.heading.is_empty()),
            "{id} has no non-empty heading"
        );
    }
}

#[test]
fn test_unknown_topic_is_absent() {
    let store = ContentStore::builtin().unwrap();
    assert!(store.lookup("does-not-exist").is_none());
    assert!(store.lookup("").is_none());
}

#[test]
fn test_authentication_generate_key_section() {
    let store = ContentStore::builtin().unwrap();
    let doc = store.lookup("authentication").unwrap();
    let section = doc
        .sections
        .iter()
        .find(|s| s.heading == "Generate API Key")
        .unwrap();
    assert_eq!(section.method, Some(Method::Post));
    assert_eq!(section.endpoint.as_deref(), Some("/api/v1/auth/keys"));
    assert!(section
        .request_body
        .as_deref()
        .unwrap()
        .contains(r#""permissions": ["read", "write"]"#));
}

#[test]
fn test_reference_indices_match_classifier() {
    let store = ContentStore::builtin().unwrap();
    let doc = store.lookup("authentication").unwrap();
    // Flow, API Keys, Generate API Key, Security Best Practices
    assert_eq!(doc.reference_indices().into_iter().collect::<Vec<_>>(), [1, 2]);
    assert!(doc.is_reference_at(2));
    assert!(!doc.is_reference_at(3));
    assert!(!doc.is_reference_at(99));
}

#[test]
fn test_teams_invite_link_response() {
    let store = ContentStore::builtin().unwrap();
    let doc = store.lookup("teams").unwrap();
    let section = doc
        .sections
        .iter()
        .find(|s| s.heading == "Generate Invite Link")
        .unwrap();
    assert!(section.is_reference());
    assert!(section.response.as_deref().unwrap().contains("\"InviteLink\""));
}

#[test]
fn test_from_sources_propagates_errors() {
    let result = ContentStore::from_sources([("ok", "# Ok\n\n## S\n\ntext\n"), ("bad", "no title")]);
    assert!(result.is_err());
}

#[test]
fn test_repeated_topic_id_is_rejected() {
    let source = "# Ok\n\n## S\n\ntext\n";
    let result = ContentStore::from_sources([("same", source), ("same", source)]);
    assert!(matches!(result, Err(ContentError::DuplicateTopic { topic }) if topic == "same"));
}
