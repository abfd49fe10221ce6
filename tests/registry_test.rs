//! Tests for the trophy registry.

use accolade_rs::error::Error;
use accolade_rs::registry::TrophyRegistry;
use accolade_rs::trophy::{Trophy, builtin};

fn trophy(id: &str) -> Trophy {
    Trophy::new(id, id.to_uppercase(), |_| Ok(false))
}

#[test]
fn list_preserves_registration_order() {
    let mut registry = TrophyRegistry::new();
    for id in ["charlie", "alpha", "bravo"] {
        registry.register(trophy(id)).unwrap();
    }

    let ids: Vec<&str> = registry.list().iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["charlie", "alpha", "bravo"]);
}

#[test]
fn duplicate_identifier_is_rejected() {
    let mut registry = TrophyRegistry::new();
    registry.register(trophy("alpha")).unwrap();

    let result = registry.register(trophy("alpha"));
    match result {
        Err(Error::DuplicateTrophy(id)) => assert_eq!(id, "alpha"),
        other => panic!("expected DuplicateTrophy, got {other:?}"),
    }

    // The registry is unchanged by the rejected call.
    assert_eq!(registry.len(), 1);
}

#[test]
fn get_looks_up_by_identifier() {
    let mut registry = TrophyRegistry::new();
    registry.register(trophy("alpha")).unwrap();

    assert_eq!(registry.get("alpha").map(|t| t.name()), Some("ALPHA"));
    assert!(registry.get("missing").is_none());
}

#[test]
fn stock_set_registers_cleanly() {
    let mut registry = TrophyRegistry::new();
    for t in builtin::all() {
        registry.register(t).unwrap();
    }

    assert_eq!(registry.len(), 4);
    assert!(registry.get("first-species").is_some());
    // Mass extinction stays a surprise.
    assert!(registry.get("mass-extinction").unwrap().is_hidden());
}

#[test]
fn predicates_read_the_snapshot() {
    use accolade_rs::model::{Creator, CreatorStats};
    use accolade_rs::trophy::ScanContext;

    let t = builtin::first_species();
    let mut ctx = ScanContext {
        creator: Creator::new(1, "ada"),
        stats: CreatorStats::default(),
    };
    assert!(!t.check(&ctx).unwrap());

    ctx.stats.species_count = 1;
    assert!(t.check(&ctx).unwrap());
}
