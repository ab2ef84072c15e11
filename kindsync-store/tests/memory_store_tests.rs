use kindsync_model::{Entity, EntityKindDescriptor, PropertyDescriptor};
use kindsync_store::{EntityStore, MemoryStore, StoreError};
use kindsync_types::{Actor, EntityId, RawValue};
use pretty_assertions::assert_eq;
use serde_json::json;

fn kind() -> EntityKindDescriptor {
    EntityKindDescriptor::new("Member")
        .with_property(PropertyDescriptor::text("Bio"))
        .with_property(PropertyDescriptor::int("Visits"))
        .with_property(PropertyDescriptor::text("Badge").computed())
}

fn actor() -> Actor {
    Actor::new(1, "admin")
}

// ── create ───────────────────────────────────────────────────────

#[test]
fn create_assigns_sequential_identities() {
    let mut store = MemoryStore::new();
    let a = store.create(&kind(), "alice", &actor()).unwrap();
    let b = store.create(&kind(), "bob", &actor()).unwrap();
    assert_eq!(a.identity, EntityId::from_raw(1));
    assert_eq!(b.identity, EntityId::from_raw(2));
    assert_eq!(store.len(), 2);
}

#[test]
fn create_initialises_slots_and_metadata() {
    let mut store = MemoryStore::new();
    let e = store.create(&kind(), "alice", &actor()).unwrap();
    assert_eq!(e.kind.as_deref(), Some("Member"));
    assert_eq!(e.created_by, "admin");
    assert!(!e.unique_id.is_nil());
    assert!(e.created_at > 0);
    assert_eq!(e.get_property("bio"), Some(&RawValue::Null));
    assert!(e.has_slot("visits"));
    assert!(!e.has_slot("badge"));
}

#[test]
fn create_generates_a_credential() {
    let mut store = MemoryStore::new();
    let e = store.create(&kind(), "alice", &actor()).unwrap();
    let credential = e.credential.unwrap();
    assert_eq!(credential.len(), 32);
    assert!(credential.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn create_rejects_taken_alias() {
    let mut store = MemoryStore::new();
    store.create(&kind(), "alice", &actor()).unwrap();
    assert!(matches!(
        store.create(&kind(), "alice", &actor()),
        Err(StoreError::AliasTaken(_))
    ));
}

// ── lookups ──────────────────────────────────────────────────────

#[test]
fn lookups_return_none_when_absent() {
    let store = MemoryStore::new();
    assert!(store.find_by_identity(EntityId::from_raw(9)).unwrap().is_none());
    assert!(store.find_by_alias("ghost").unwrap().is_none());
    assert!(store.find_by_contact("a@b.c").unwrap().is_none());
}

#[test]
fn find_by_contact_ignores_case() {
    let mut store = MemoryStore::new();
    let mut e = store.create(&kind(), "alice", &actor()).unwrap();
    e.contact = Some("Alice@Example.com".into());
    store.save(&e).unwrap();
    let found = store.find_by_contact("alice@example.COM").unwrap().unwrap();
    assert_eq!(found.alias, "alice");
}

#[test]
fn list_all_keeps_creation_order() {
    let mut store = MemoryStore::new();
    for alias in ["c", "a", "b"] {
        store.create(&kind(), alias, &actor()).unwrap();
    }
    let aliases: Vec<String> = store.list_all().unwrap().into_iter().map(|e| e.alias).collect();
    assert_eq!(aliases, vec!["c", "a", "b"]);
}

// ── save ─────────────────────────────────────────────────────────

#[test]
fn save_replaces_stored_copy() {
    let mut store = MemoryStore::new();
    let mut e = store.create(&kind(), "alice", &actor()).unwrap();
    e.set_property("bio", json!("hi"));
    e.parent = Some(EntityId::from_raw(5));
    store.save(&e).unwrap();

    let back = store.find_by_identity(e.identity).unwrap().unwrap();
    assert_eq!(back.get_str("bio"), Some("hi"));
    assert_eq!(back.parent, Some(EntityId::from_raw(5)));
    assert_eq!(store.save_count(), 1);
}

#[test]
fn save_unknown_identity_is_not_found() {
    let mut store = MemoryStore::new();
    let mut e = Entity::new("ghost");
    e.identity = EntityId::from_raw(42);
    assert!(matches!(store.save(&e), Err(StoreError::NotFound(_))));
}

#[test]
fn save_cannot_steal_alias() {
    let mut store = MemoryStore::new();
    store.create(&kind(), "alice", &actor()).unwrap();
    let mut bob = store.create(&kind(), "bob", &actor()).unwrap();
    bob.alias = "alice".into();
    assert!(matches!(store.save(&bob), Err(StoreError::AliasTaken(_))));
}

// ── insert ───────────────────────────────────────────────────────

#[test]
fn insert_keeps_explicit_identity_and_advances_counter() {
    let mut store = MemoryStore::new();
    let mut e = Entity::new("seeded");
    e.identity = EntityId::from_raw(10);
    assert_eq!(store.insert(e).unwrap(), EntityId::from_raw(10));
    let next = store.create(&kind(), "after", &actor()).unwrap();
    assert_eq!(next.identity, EntityId::from_raw(11));
}

#[test]
fn insert_assigns_identity_to_new_entities() {
    let mut store = MemoryStore::new();
    let id = store.insert(Entity::new("fresh")).unwrap();
    assert!(!id.is_new());
}

#[test]
fn insert_rejects_taken_identity() {
    let mut store = MemoryStore::new();
    let mut a = Entity::new("A");
    a.identity = EntityId::from_raw(1);
    store.insert(a).unwrap();

    let mut b = Entity::new("B");
    b.identity = EntityId::from_raw(1);
    assert!(matches!(store.insert(b), Err(StoreError::IdentityTaken(id)) if id == EntityId::from_raw(1)));
    assert_eq!(store.len(), 1);
    assert_eq!(store.find_by_identity(EntityId::from_raw(1)).unwrap().unwrap().alias, "A");
}

// ── snapshots ────────────────────────────────────────────────────

#[test]
fn json_snapshot_roundtrip() {
    let mut store = MemoryStore::new();
    store.create(&kind(), "alice", &actor()).unwrap();
    store.create(&kind(), "bob", &actor()).unwrap();

    let restored = MemoryStore::from_json(&store.to_json().unwrap()).unwrap();
    assert_eq!(restored.list_all().unwrap(), store.list_all().unwrap());
}

#[test]
fn snapshot_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let fresh = MemoryStore::open(&path).unwrap();
    assert!(fresh.is_empty());

    let mut store = MemoryStore::new();
    store.create(&kind(), "alice", &actor()).unwrap();
    store.persist(&path).unwrap();

    let mut reopened = MemoryStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    let next = reopened.create(&kind(), "bob", &actor()).unwrap();
    assert_eq!(next.identity, EntityId::from_raw(2));
}

#[test]
fn snapshot_with_zero_identity_is_rejected() {
    let text = r#"{
        "next_identity": 2,
        "entities": [{
            "identity": 0, "alias": "bad", "unique_id": "00000000-0000-0000-0000-000000000000",
            "created_at": 0, "created_by": ""
        }]
    }"#;
    assert!(matches!(MemoryStore::from_json(text), Err(StoreError::InvalidData(_))));
}

#[test]
fn malformed_snapshot_is_serialization_error() {
    assert!(matches!(
        MemoryStore::from_json("{not json"),
        Err(StoreError::Serialization(_))
    ));
}

fn snapshot_with(entities: &[(u64, &str)]) -> String {
    let entities: Vec<serde_json::Value> = entities
        .iter()
        .map(|(id, alias)| {
            json!({
                "identity": id, "alias": alias,
                "unique_id": "00000000-0000-0000-0000-000000000000",
                "created_at": 0, "created_by": ""
            })
        })
        .collect();
    json!({ "next_identity": 10, "entities": entities }).to_string()
}

#[test]
fn snapshot_with_duplicate_identity_is_rejected() {
    let text = snapshot_with(&[(1, "A"), (1, "B")]);
    assert!(matches!(MemoryStore::from_json(&text), Err(StoreError::InvalidData(_))));
}

#[test]
fn snapshot_with_duplicate_alias_is_rejected() {
    let text = snapshot_with(&[(1, "A"), (2, "A")]);
    assert!(matches!(MemoryStore::from_json(&text), Err(StoreError::InvalidData(_))));
}

#[test]
fn snapshot_with_distinct_entries_loads() {
    let store = MemoryStore::from_json(&snapshot_with(&[(1, "A"), (2, "B")])).unwrap();
    assert_eq!(store.len(), 2);
}
