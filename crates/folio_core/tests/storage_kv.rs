use folio_core::storage::{DEFAULT_QUOTA_BYTES, CONTENT_KEY};
use folio_core::{KvStore, MemoryKvStore, SqliteKvStore, StorageError};

fn exercise_basic_contract(store: &mut dyn KvStore) {
    assert_eq!(store.get_item("missing").unwrap(), None);

    store.set_item("k", "v1").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v1"));

    store.set_item("k", "v2").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
}

#[test]
fn memory_store_honors_basic_contract() {
    exercise_basic_contract(&mut MemoryKvStore::new());
}

#[test]
fn sqlite_store_honors_basic_contract() {
    exercise_basic_contract(&mut SqliteKvStore::open_in_memory(None).unwrap());
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.sqlite3");

    let mut store = SqliteKvStore::open(&path, Some(DEFAULT_QUOTA_BYTES)).unwrap();
    store.set_item(CONTENT_KEY, "{\"a\":1}").unwrap();
    drop(store);

    let reopened = SqliteKvStore::open(&path, Some(DEFAULT_QUOTA_BYTES)).unwrap();
    assert_eq!(
        reopened.get_item(CONTENT_KEY).unwrap().as_deref(),
        Some("{\"a\":1}")
    );
}

#[test]
fn sqlite_quota_counts_all_keys_and_keeps_old_value_on_reject() {
    let mut store = SqliteKvStore::open_in_memory(Some(22)).unwrap();
    store.set_item("auth", "true").unwrap();
    store.set_item("data", "0123456789").unwrap();
    assert_eq!(store.usage_bytes().unwrap(), 22);

    let err = store.set_item("data", "0123456789A").unwrap_err();
    match err {
        StorageError::QuotaExceeded {
            required_bytes,
            quota_bytes,
        } => {
            assert_eq!(required_bytes, 23);
            assert_eq!(quota_bytes, 22);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        store.get_item("data").unwrap().as_deref(),
        Some("0123456789")
    );

    // Shrinking an existing value is always accepted.
    store.set_item("data", "0").unwrap();
    assert_eq!(store.usage_bytes().unwrap(), 13);
}

#[test]
fn memory_quota_matches_sqlite_accounting() {
    let mut store = MemoryKvStore::with_quota(22);
    store.set_item("auth", "true").unwrap();
    store.set_item("data", "0123456789").unwrap();
    assert_eq!(store.usage_bytes(), 22);
    assert!(matches!(
        store.set_item("more", "x"),
        Err(StorageError::QuotaExceeded { .. })
    ));
}
