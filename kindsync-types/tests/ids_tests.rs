use kindsync_types::{Actor, EntityId};
use std::collections::HashSet;
use std::str::FromStr;

// ── EntityId ──────────────────────────────────────────────────────

#[test]
fn default_identity_is_the_new_sentinel() {
    assert_eq!(EntityId::default(), EntityId::NEW);
    assert!(EntityId::default().is_new());
}

#[test]
fn nonzero_identity_is_not_new() {
    assert!(!EntityId::from_raw(7).is_new());
}

#[test]
fn raw_roundtrip() {
    let id = EntityId::from_raw(1042);
    assert_eq!(id.as_raw(), 1042);
    assert_eq!(EntityId::from(1042u64), id);
}

#[test]
fn display_and_parse() {
    let id = EntityId::from_raw(99);
    let s = id.to_string();
    assert_eq!(s, "99");
    assert_eq!(EntityId::parse(&s).unwrap(), id);
}

#[test]
fn parse_trims_whitespace() {
    assert_eq!(EntityId::parse(" 12 ").unwrap(), EntityId::from_raw(12));
}

#[test]
fn from_str_invalid() {
    assert!(EntityId::from_str("garbage").is_err());
    assert!(EntityId::from_str("-3").is_err());
}

#[test]
fn ordering_follows_raw_value() {
    assert!(EntityId::from_raw(1) < EntityId::from_raw(2));
}

#[test]
fn hash_and_eq() {
    let id = EntityId::from_raw(5);
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn serde_is_transparent() {
    let json = serde_json::to_string(&EntityId::from_raw(8)).unwrap();
    assert_eq!(json, "8");
    let back: EntityId = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_raw(), 8);
}

// ── Actor ─────────────────────────────────────────────────────────

#[test]
fn actor_display() {
    let actor = Actor::new(3, "editor");
    assert_eq!(actor.to_string(), "editor#3");
}

#[test]
fn admin_actor() {
    let admin = Actor::admin();
    assert_eq!(admin.id, 0);
    assert_eq!(admin.name, "admin");
}
