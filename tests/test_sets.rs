mod common;

use mtgjson_catalog::{ApiMeta, CatalogError, Set, SetRepository, SYSTEM_USER};

// ---------------------------------------------------------------------------
// create / get
// ---------------------------------------------------------------------------

#[test]
fn create_and_get_round_trip() {
    let store = common::memory_store();
    let repo = SetRepository::new(&store);

    let mut set = Set::new("MH2", "Modern Horizons 2");
    repo.create(&mut set, None).unwrap();

    let fetched = repo.get("MH2", None).unwrap();
    assert_eq!(fetched.name, "Modern Horizons 2");
    assert!(fetched.content_ids.is_empty());
    assert!(fetched.release_date.is_some());

    let meta = fetched.mtgjson_api_meta.unwrap();
    assert_eq!(meta.owner, SYSTEM_USER);
    assert_eq!(meta.type_field, "Set");
}

#[test]
fn create_conflict_and_missing_fields() {
    let store = common::memory_store();
    let repo = SetRepository::new(&store);

    repo.create(&mut Set::new("A25", "Masters 25"), None).unwrap();
    let err = repo
        .create(&mut Set::new("A25", "Masters Again"), None)
        .unwrap_err();
    assert!(matches!(err, CatalogError::AlreadyExists(_)));

    let err = repo.create(&mut Set::new("X", ""), None).unwrap_err();
    assert!(matches!(err, CatalogError::MissingIdentifier(_)));
}

// ---------------------------------------------------------------------------
// content mutation
// ---------------------------------------------------------------------------

#[test]
fn add_cards_appends_and_persists() {
    let store = common::memory_store();
    let repo = SetRepository::new(&store);

    let mut set = Set::new("SET1", "Content Set");
    repo.create(&mut set, None).unwrap();

    let (a, b) = (common::uuid(1), common::uuid(2));
    repo.add_cards(&mut set, &[a.clone(), b.clone()]).unwrap();
    assert_eq!(set.content_ids, vec![a.clone(), b.clone()]);

    let persisted = repo.get("SET1", None).unwrap();
    assert_eq!(persisted.content_ids, set.content_ids);
}

#[test]
fn remove_cards_drops_every_occurrence() {
    let store = common::memory_store();
    let repo = SetRepository::new(&store);

    let mut set = Set::new("SET2", "Dupes");
    repo.create(&mut set, None).unwrap();

    let (a, b) = (common::uuid(3), common::uuid(4));
    repo.add_cards(&mut set, &[a.clone(), b.clone(), a.clone()])
        .unwrap();

    repo.remove_cards(&mut set, &[a.clone()]).unwrap();
    assert_eq!(set.content_ids, vec![b]);
}

#[test]
fn empty_mutations_consume_no_store_call() {
    let fake = common::CountingStore::default();
    let repo = SetRepository::new(&fake);

    let mut set = Set::new("SET3", "Idle");
    set.mtgjson_api_meta = Some(ApiMeta::stamp(SYSTEM_USER, "Set", None));

    repo.add_cards(&mut set, &[]).unwrap();
    repo.remove_cards(&mut set, &[]).unwrap();
    assert_eq!(fake.calls.get(), 0);
}

#[test]
fn mutation_requires_metadata_block() {
    let store = common::memory_store();
    let repo = SetRepository::new(&store);

    let mut unstamped = Set::new("SET4", "Unstamped");
    let err = repo
        .add_cards(&mut unstamped, &[common::uuid(5)])
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingMeta(_)));
    assert!(unstamped.content_ids.is_empty(), "no partial mutation");
}

// ---------------------------------------------------------------------------
// owner isolation
// ---------------------------------------------------------------------------

#[test]
fn same_code_under_two_owners_stays_isolated() {
    let store = common::memory_store();
    common::seed_user(&store, "alice", "alice@example.com");
    let repo = SetRepository::new(&store);

    let mut system_set = Set::new("DUP", "System Set");
    repo.create(&mut system_set, None).unwrap();
    let mut alice_set = Set::new("DUP", "Alice Set");
    repo.create(&mut alice_set, Some("alice@example.com")).unwrap();

    repo.add_cards(&mut alice_set, &[common::uuid(10)]).unwrap();

    // Alice's mutation never touches the system document.
    let system_view = repo.get("DUP", Some(SYSTEM_USER)).unwrap();
    assert_eq!(system_view.name, "System Set");
    assert!(system_view.content_ids.is_empty());

    let alice_view = repo.get("DUP", Some("alice@example.com")).unwrap();
    assert_eq!(alice_view.content_ids, vec![common::uuid(10)]);

    // An owner-scoped delete removes only that owner's document.
    repo.delete("DUP", Some("alice@example.com")).unwrap();
    assert!(matches!(
        repo.get("DUP", Some("alice@example.com")).unwrap_err(),
        CatalogError::NotFound(_)
    ));
    assert!(repo.get("DUP", Some(SYSTEM_USER)).is_ok());
}

// ---------------------------------------------------------------------------
// hydration
// ---------------------------------------------------------------------------

#[test]
fn contents_resolves_referenced_cards() {
    let store = common::memory_store();
    let (a, b) = (common::uuid(6), common::uuid(7));
    common::seed_cards(&store, &[("Bolt", &a), ("Counter", &b)]);
    let repo = SetRepository::new(&store);

    let mut set = Set::new("SET5", "Hydrated");
    repo.create(&mut set, None).unwrap();
    repo.add_cards(&mut set, &[a, b]).unwrap();

    let cards = repo.contents(&set).unwrap();
    assert_eq!(cards.len(), 2);

    let mut names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Bolt", "Counter"]);
}

#[test]
fn contents_drops_unresolvable_ids_and_keeps_references() {
    let store = common::memory_store();
    let (a, missing) = (common::uuid(8), common::uuid(9));
    common::seed_cards(&store, &[("Survivor", &a)]);
    let repo = SetRepository::new(&store);

    let mut set = Set::new("SET6", "Gappy");
    repo.create(&mut set, None).unwrap();
    repo.add_cards(&mut set, &[a.clone(), missing.clone()]).unwrap();

    let cards = repo.contents(&set).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].uuid(), a);

    // The persisted reference list is untouched.
    assert!(set.content_ids.contains(&missing));
}

#[test]
fn contents_with_no_references_makes_no_store_call() {
    let fake = common::CountingStore::default();
    let repo = SetRepository::new(&fake);

    let set = Set::new("SET7", "Empty");
    assert!(repo.contents(&set).unwrap().is_empty());
    assert_eq!(fake.calls.get(), 0);
}

// ---------------------------------------------------------------------------
// CRUD remainder
// ---------------------------------------------------------------------------

#[test]
fn delete_list_and_replace() {
    let store = common::memory_store();
    let repo = SetRepository::new(&store);

    repo.create(&mut Set::new("AAA", "First"), None).unwrap();
    repo.create(&mut Set::new("BBB", "Second"), None).unwrap();
    assert_eq!(repo.list(10).unwrap().len(), 2);

    repo.delete("AAA", None).unwrap();
    assert!(matches!(
        repo.get("AAA", None).unwrap_err(),
        CatalogError::NotFound(_)
    ));

    let err = repo.replace(&Set::new("NOPE", "Ghost")).unwrap_err();
    assert!(matches!(err, CatalogError::UpdateFailed(_)));
}
