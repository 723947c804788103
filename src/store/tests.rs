#![allow(clippy::unwrap_used)]

use std::io;

use rust_decimal_macros::dec;

use super::*;
use crate::errors::{StorageError, StoreError};
use crate::models::{Draft, Expense};
use crate::storage::{MemoryStore, Storage};

fn make_store() -> ExpenseStore<MemoryStore> {
    ExpenseStore::new(MemoryStore::default())
}

fn stage(store: &mut ExpenseStore<impl Storage>, amount: &str, date: &str, note: &str) {
    store.draft.amount = amount.into();
    store.draft.date = date.into();
    store.draft.note = note.into();
}

fn submit(store: &mut ExpenseStore<impl Storage>, amount: &str, date: &str, note: &str) -> i64 {
    stage(store, amount, date, note);
    store.submit().unwrap()
}

/// Storage that accepts nothing and holds nothing.
struct FailingStore;

impl Storage for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read(io::Error::new(
            io::ErrorKind::Other,
            "backing store unavailable",
        )))
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write(io::Error::new(
            io::ErrorKind::Other,
            "disk full",
        )))
    }
}

// ── Create ────────────────────────────────────────────────────

#[test]
fn test_submit_add_prepends() {
    let mut store = make_store();
    submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert_eq!(store.len(), 1);

    submit(&mut store, "3.20", "2024-01-02", "Coffee");
    assert_eq!(store.len(), 2);
    // Newest first.
    assert_eq!(store.expenses()[0].note, "Coffee");
    assert_eq!(store.expenses()[1].note, "Lunch");
}

#[test]
fn test_submit_add_clears_draft_and_session() {
    let mut store = make_store();
    submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert_eq!(store.draft, Draft::default());
    assert_eq!(store.editing(), None);
}

#[test]
fn test_ids_unique_under_rapid_submits() {
    let mut store = make_store();
    for i in 0..20 {
        submit(&mut store, "1.00", "2024-01-01", &format!("entry {i}"));
    }
    let mut ids: Vec<i64> = store.expenses().iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn test_submit_empty_field_is_rejected() {
    let mut store = make_store();
    submit(&mut store, "12.50", "2024-01-01", "Lunch");

    stage(&mut store, "5.00", "", "Snack");
    let err = store.submit().unwrap_err();
    assert_eq!(err, StoreError::Validation(vec!["date"]));

    // Nothing moved: collection, session, and the staged draft all stand.
    assert_eq!(store.len(), 1);
    assert_eq!(store.editing(), None);
    assert_eq!(store.draft.note, "Snack");
}

#[test]
fn test_submit_all_fields_empty() {
    let mut store = make_store();
    let err = store.submit().unwrap_err();
    assert_eq!(err, StoreError::Validation(vec!["amount", "date", "note"]));
    assert!(store.is_empty());
}

#[test]
fn test_submit_validation_preserves_edit_session() {
    let mut store = make_store();
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert!(store.begin_edit(id));

    store.draft.amount.clear();
    assert!(store.submit().is_err());
    assert_eq!(store.editing(), Some(id));
    assert_eq!(store.expenses()[0].amount, "12.50");
}

// ── Edit ──────────────────────────────────────────────────────

#[test]
fn test_begin_edit_copies_fields() {
    let mut store = make_store();
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");

    assert!(store.begin_edit(id));
    assert_eq!(store.editing(), Some(id));
    assert_eq!(store.draft.amount, "12.50");
    assert_eq!(store.draft.date, "2024-01-01");
    assert_eq!(store.draft.note, "Lunch");
}

#[test]
fn test_begin_edit_unknown_id_is_inert() {
    let mut store = make_store();
    submit(&mut store, "12.50", "2024-01-01", "Lunch");

    assert!(!store.begin_edit(99999));
    assert_eq!(store.editing(), None);
    assert_eq!(store.draft, Draft::default());
}

#[test]
fn test_submit_edit_replaces_fields_in_place() {
    let mut store = make_store();
    let first = submit(&mut store, "1.00", "2024-01-01", "First");
    let second = submit(&mut store, "2.00", "2024-01-02", "Second");
    let third = submit(&mut store, "3.00", "2024-01-03", "Third");

    assert!(store.begin_edit(second));
    store.draft.amount = "2.50".into();
    assert_eq!(store.submit().unwrap(), second);

    // Size, order, and ids all unchanged; only the fields moved.
    assert_eq!(store.len(), 3);
    let ids: Vec<i64> = store.expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![third, second, first]);
    assert_eq!(store.expenses()[1].amount, "2.50");
    assert_eq!(store.expenses()[1].note, "Second");
    assert_eq!(store.editing(), None);
}

#[test]
fn test_cancel_edit_is_idempotent() {
    let mut store = make_store();
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert!(store.begin_edit(id));

    store.cancel_edit();
    store.cancel_edit();
    assert_eq!(store.editing(), None);
    assert_eq!(store.draft, Draft::default());
}

// ── Delete ────────────────────────────────────────────────────

#[test]
fn test_delete_removes_record() {
    let mut store = make_store();
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    let keep = submit(&mut store, "3.20", "2024-01-02", "Coffee");

    store.delete(id);
    assert_eq!(store.len(), 1);
    assert_eq!(store.expenses()[0].id, keep);
}

#[test]
fn test_delete_absent_id_is_noop() {
    let mut store = make_store();
    submit(&mut store, "12.50", "2024-01-01", "Lunch");
    store.delete(99999);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_edit_target_clears_session() {
    let mut store = make_store();
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert!(store.begin_edit(id));

    store.delete(id);
    assert!(store.is_empty());
    assert_eq!(store.editing(), None);
    assert_eq!(store.draft, Draft::default());
}

#[test]
fn test_delete_other_record_keeps_session() {
    let mut store = make_store();
    let lunch = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    let coffee = submit(&mut store, "3.20", "2024-01-02", "Coffee");
    assert!(store.begin_edit(lunch));

    store.delete(coffee);
    assert_eq!(store.editing(), Some(lunch));
    assert_eq!(store.draft.note, "Lunch");
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn test_mutations_round_trip_through_storage() {
    let storage = MemoryStore::default();
    let mut store = ExpenseStore::new(storage.clone());
    submit(&mut store, "12.50", "2024-01-01", "Lunch");
    submit(&mut store, "3.20", "2024-01-02", "Coffee");
    let expected: Vec<Expense> = store.expenses().to_vec();

    let mut reloaded = ExpenseStore::new(storage);
    reloaded.load();
    assert_eq!(reloaded.expenses(), expected.as_slice());
}

#[test]
fn test_persisted_layout() {
    let storage = MemoryStore::default();
    let mut store = ExpenseStore::new(storage.clone());
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");

    let raw = storage.read(STORAGE_KEY).unwrap().unwrap();
    let expected = format!(
        r#"[{{"id":{id},"amount":"12.50","date":"2024-01-01","note":"Lunch"}}]"#
    );
    assert_eq!(raw, expected);
}

#[test]
fn test_load_missing_key_starts_empty() {
    let mut store = make_store();
    store.load();
    assert!(store.is_empty());
}

#[test]
fn test_load_corrupted_data_starts_empty() {
    let mut storage = MemoryStore::default();
    storage.write(STORAGE_KEY, "definitely not json").unwrap();

    let mut store = ExpenseStore::new(storage);
    store.load();
    assert!(store.is_empty());
}

#[test]
fn test_load_read_failure_starts_empty() {
    let mut store = ExpenseStore::new(FailingStore);
    store.load();
    assert!(store.is_empty());
}

#[test]
fn test_write_failure_keeps_in_memory_state() {
    let mut store = ExpenseStore::new(FailingStore);
    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert_eq!(store.len(), 1);

    store.delete(id);
    assert!(store.is_empty());
}

// ── Aggregates & scenario ─────────────────────────────────────

#[test]
fn test_total_skips_unparseable_amounts() {
    let mut store = make_store();
    submit(&mut store, "12.50", "2024-01-01", "Lunch");
    submit(&mut store, "7.50", "2024-01-02", "Cinema");
    submit(&mut store, "oops", "2024-01-03", "Typo");
    assert_eq!(store.total(), dec!(20.00));
}

#[test]
fn test_add_edit_delete_scenario() {
    let mut store = make_store();

    let id = submit(&mut store, "12.50", "2024-01-01", "Lunch");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).unwrap().amount, "12.50");

    assert!(store.begin_edit(id));
    store.draft.amount = "15.00".into();
    assert_eq!(store.submit().unwrap(), id);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).unwrap().amount, "15.00");
    assert_eq!(store.get(id).unwrap().note, "Lunch");

    store.delete(id);
    assert!(store.is_empty());
    assert_eq!(store.editing(), None);
}
