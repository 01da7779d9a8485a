use folio_core::service::session::DEMO_ADMIN_PASSWORD;
use folio_core::storage::AUTH_KEY;
use folio_core::{AdminSession, KvStore, MemoryKvStore, SqliteKvStore};

#[test]
fn wrong_password_is_rejected_without_touching_storage() {
    let mut session = AdminSession::new(MemoryKvStore::new());

    assert!(!session.login("letmein").unwrap());
    assert!(!session.is_authenticated());
    assert_eq!(session.into_storage().get_item(AUTH_KEY).unwrap(), None);
}

#[test]
fn demo_password_sets_flag_and_logout_clears_it() {
    let mut session = AdminSession::new(MemoryKvStore::new());

    assert!(session.login(DEMO_ADMIN_PASSWORD).unwrap());
    assert!(session.is_authenticated());

    session.logout().unwrap();
    session.logout().unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn only_exact_true_flag_counts_as_authenticated() {
    let mut storage = MemoryKvStore::new();
    storage.set_item(AUTH_KEY, "TRUE").unwrap();
    assert!(!AdminSession::new(&mut storage).is_authenticated());

    storage.set_item(AUTH_KEY, "true").unwrap();
    assert!(AdminSession::new(&mut storage).is_authenticated());
}

#[test]
fn flag_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.sqlite3");

    let mut session = AdminSession::new(SqliteKvStore::open(&path, None).unwrap());
    session.login(DEMO_ADMIN_PASSWORD).unwrap();
    drop(session);

    let session = AdminSession::new(SqliteKvStore::open(&path, None).unwrap());
    assert!(session.is_authenticated());
}
