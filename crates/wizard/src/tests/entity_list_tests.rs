use super::*;
use crate::{
    draft::GeneralData,
    field::FieldScalar,
    schema::{GRANTED_FLOW, WELL_SCHEMA},
};
use shared::domain::Category;

fn entity(name: &str, flow: f64) -> EntityDraft {
    let mut draft = EntityDraft::empty(&WELL_SCHEMA);
    draft.general_data = Some(GeneralData {
        name: name.to_string(),
        category: Category::A,
        location_text: "Ruta 5 km 12".to_string(),
    });
    let spec = WELL_SCHEMA.field(GRANTED_FLOW).expect("flow spec");
    draft
        .well_data
        .set_field(spec, Some(&FieldScalar::Number(flow)), true);
    draft
}

#[test]
fn add_appends_and_counts() {
    let mut list = EntityList::new();
    list.add(entity("WELL-A", 10.0)).expect("add a");
    list.add(entity("WELL-B", 11.0)).expect("add b");

    assert_eq!(list.len(), 2);
    assert_eq!(list.counter(), 2);
    assert_eq!(list.summary(), "2 pozos ingresados");
    assert_eq!(list.entries()[1].name(), Some("WELL-B"));
}

#[test]
fn add_rejects_case_insensitive_duplicate() {
    let mut list = EntityList::new();
    list.add(entity("Well-A", 10.0)).expect("add");

    let err = list.add(entity("WELL-a", 20.0)).expect_err("duplicate");
    assert_eq!(
        err,
        EntityListError::Duplicate {
            name: "WELL-a".to_string()
        }
    );
    assert_eq!(list.len(), 1);
    assert_eq!(list.counter(), 1);
    assert_eq!(
        list.find("well-a")
            .and_then(|e| e.well_data.get(GRANTED_FLOW))
            .and_then(|v| v.number()),
        Some(10.0)
    );
}

#[test]
fn update_replaces_matching_entry_in_place() {
    let mut list = EntityList::new();
    list.add(entity("WELL-A", 10.0)).expect("add a");
    list.add(entity("WELL-B", 11.0)).expect("add b");

    assert!(list.update(entity("well-a", 42.0)));
    assert_eq!(list.len(), 2);
    assert_eq!(list.entries()[0].name(), Some("well-a"));
    assert_eq!(
        list.entries()[0]
            .well_data
            .get(GRANTED_FLOW)
            .and_then(|v| v.number()),
        Some(42.0)
    );
}

#[test]
fn update_without_match_is_silent_noop() {
    let mut list = EntityList::new();
    list.add(entity("WELL-A", 10.0)).expect("add");
    let before = list.clone();

    assert!(!list.update(entity("WELL-Z", 1.0)));
    assert_eq!(list, before);
}

#[test]
fn delete_on_miss_keeps_entries_but_decrements_counter() {
    let mut list = EntityList::new();
    list.add(entity("WELL-A", 10.0)).expect("add");

    assert_eq!(list.delete("WELL-Z"), 0);
    assert_eq!(list.len(), 1);
    assert_eq!(list.entries()[0].name(), Some("WELL-A"));
    assert_eq!(list.counter(), 0);
}

#[test]
fn delete_removes_by_normalized_name() {
    let mut list = EntityList::new();
    list.add(entity("WELL-A", 10.0)).expect("add a");
    list.add(entity("WELL-B", 11.0)).expect("add b");

    assert_eq!(list.delete(" well-a "), 1);
    assert_eq!(list.len(), 1);
    assert_eq!(list.counter(), 1);
    assert!(!list.contains("WELL-A"));
}

#[test]
fn select_for_edit_resets_touched_and_keeps_values() {
    let mut list = EntityList::new();
    list.add(entity("WELL-A", 10.0)).expect("add");

    let draft = list.select_for_edit("well-a").expect("selected");
    assert!(draft.is_edit);
    let flow = draft.well_data.get(GRANTED_FLOW).expect("flow");
    assert!(!flow.touched);
    assert_eq!(flow.number(), Some(10.0));
    assert!(list.select_for_edit("missing").is_none());
}

#[test]
fn pending_excludes_stored_entries_and_survives_edit() {
    let mut list = EntityList::new();
    let mut stored = entity("WELL-A", 10.0);
    stored.persisted = true;
    list.add(stored).expect("add stored");
    list.add(entity("WELL-B", 11.0)).expect("add new");

    let pending: Vec<_> = list.pending().filter_map(EntityDraft::name).collect();
    assert_eq!(pending, vec!["WELL-B"]);

    let edited = list.select_for_edit("well-a").expect("edit");
    assert!(edited.persisted);
    assert!(list.update(edited.snapshot()));
    assert_eq!(list.pending().count(), 1);

    assert_eq!(list.mark_persisted(), 1);
    assert_eq!(list.pending().count(), 0);
}
