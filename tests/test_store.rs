mod common;

use mtgjson_catalog::store::{DocumentStore, DuckStore, Filter, OWNER_PATH};
use serde_json::json;

fn doc(code: &str, owner: &str) -> serde_json::Value {
    json!({
        "code": code,
        "name": format!("Set {}", code),
        "mtgjsonApiMeta": { "owner": owner }
    })
}

// ---------------------------------------------------------------------------
// find_one / insert
// ---------------------------------------------------------------------------

#[test]
fn insert_then_find_one_round_trips() {
    let store = common::memory_store();
    store.insert("set", &doc("A25", "system")).unwrap();

    let found = store
        .find_one("set", &Filter::key("$.code", "A25"))
        .unwrap()
        .expect("document present");
    assert_eq!(found["name"], "Set A25");
}

#[test]
fn find_one_returns_none_for_absent_keys() {
    let store = common::memory_store();
    let found = store.find_one("set", &Filter::key("$.code", "NOPE")).unwrap();
    assert!(found.is_none());
}

#[test]
fn owner_clause_narrows_the_filter() {
    let store = common::memory_store();
    store.insert("set", &doc("DUP", "alice@example.com")).unwrap();
    store.insert("set", &doc("DUP", "bob@example.com")).unwrap();

    let found = store
        .find_one(
            "set",
            &Filter::key("$.code", "DUP").owner(Some("bob@example.com")),
        )
        .unwrap()
        .expect("bob's document");
    assert_eq!(found["mtgjsonApiMeta"]["owner"], "bob@example.com");

    // Empty owner means no ownership filter.
    let any = store
        .find_one("set", &Filter::key("$.code", "DUP").owner(Some("")))
        .unwrap();
    assert!(any.is_some());

    let none = store
        .find_one(
            "set",
            &Filter::key("$.code", "DUP").owner(Some("carol@example.com")),
        )
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn owner_path_matches_the_metadata_block() {
    // The filter path constant and the serialized metadata layout must agree.
    assert_eq!(OWNER_PATH, "$.mtgjsonApiMeta.owner");
}

// ---------------------------------------------------------------------------
// find_many
// ---------------------------------------------------------------------------

#[test]
fn find_many_returns_the_matching_subset() {
    let store = common::memory_store();
    for code in ["AAA", "BBB", "CCC"] {
        store.insert("set", &doc(code, "system")).unwrap();
    }

    let docs = store
        .find_many(
            "set",
            "$.code",
            &["AAA".to_string(), "CCC".to_string(), "ZZZ".to_string()],
        )
        .unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn find_many_with_no_keys_is_empty_without_error() {
    let store = common::memory_store();
    let docs = store.find_many("set", "$.code", &[]).unwrap();
    assert!(docs.is_empty());
}

// ---------------------------------------------------------------------------
// replace / delete / list_all
// ---------------------------------------------------------------------------

#[test]
fn replace_reports_the_affected_count() {
    let store = common::memory_store();
    store.insert("set", &doc("AAA", "system")).unwrap();

    let updated = json!({ "code": "AAA", "name": "Renamed", "mtgjsonApiMeta": { "owner": "system" } });
    let count = store
        .replace("set", &Filter::key("$.code", "AAA"), &updated)
        .unwrap();
    assert_eq!(count, 1);

    let found = store
        .find_one("set", &Filter::key("$.code", "AAA"))
        .unwrap()
        .unwrap();
    assert_eq!(found["name"], "Renamed");

    let count = store
        .replace("set", &Filter::key("$.code", "NOPE"), &updated)
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn delete_reports_the_deleted_count() {
    let store = common::memory_store();
    store.insert("set", &doc("AAA", "system")).unwrap();

    assert_eq!(store.delete("set", &Filter::key("$.code", "AAA")).unwrap(), 1);
    assert_eq!(store.delete("set", &Filter::key("$.code", "AAA")).unwrap(), 0);
}

#[test]
fn replace_and_delete_touch_at_most_one_document() {
    let store = common::memory_store();
    store.insert("set", &doc("DUP", "alice@example.com")).unwrap();
    store.insert("set", &doc("DUP", "bob@example.com")).unwrap();

    // A filter matching several rows still replaces only one of them.
    let updated = json!({ "code": "DUP", "name": "Renamed", "mtgjsonApiMeta": { "owner": "alice@example.com" } });
    let count = store
        .replace("set", &Filter::key("$.code", "DUP"), &updated)
        .unwrap();
    assert_eq!(count, 1);

    let renamed = store
        .list_all("set", 10)
        .unwrap()
        .iter()
        .filter(|d| d["name"] == "Renamed")
        .count();
    assert_eq!(renamed, 1);

    // Likewise a matching delete removes a single row.
    assert_eq!(store.delete("set", &Filter::key("$.code", "DUP")).unwrap(), 1);
    assert_eq!(store.list_all("set", 10).unwrap().len(), 1);
}

#[test]
fn list_all_honors_the_limit() {
    let store = common::memory_store();
    for code in ["AAA", "BBB", "CCC"] {
        store.insert("set", &doc(code, "system")).unwrap();
    }

    assert_eq!(store.list_all("set", 10).unwrap().len(), 3);
    assert_eq!(store.list_all("set", 2).unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// on-disk persistence
// ---------------------------------------------------------------------------

#[test]
fn on_disk_store_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.duckdb");

    {
        let store = DuckStore::open(&path).unwrap();
        store.insert("set", &doc("AAA", "system")).unwrap();
    }

    let reopened = DuckStore::open(&path).unwrap();
    let found = reopened
        .find_one("set", &Filter::key("$.code", "AAA"))
        .unwrap();
    assert!(found.is_some());
}
