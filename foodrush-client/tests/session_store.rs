//! Session persistence behavior

use foodrush_client::{Session, SessionStore, UserInfo};

fn user() -> UserInfo {
    UserInfo {
        id: 7,
        username: "dispatcher".to_string(),
        email: "dispatcher@example.com".to_string(),
        role: "admin".to_string(),
        is_active: true,
        created_at: 1_700_000_000_000,
    }
}

#[test]
fn save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path(), "session.json");

    assert!(!store.exists());
    assert!(store.load().is_none());

    let session = Session {
        user: user(),
        token: "jwt-token".to_string(),
    };
    store.save(&session).unwrap();

    assert!(store.exists());
    let loaded = store.load().unwrap();
    assert_eq!(loaded.token, "jwt-token");
    assert_eq!(loaded.user.username, "dispatcher");
    assert_eq!(loaded.user.role, "admin");
}

#[test]
fn clear_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path(), "session.json");

    store
        .save(&Session {
            user: user(),
            token: "t".to_string(),
        })
        .unwrap();
    assert!(store.exists());

    store.clear().unwrap();
    assert!(!store.exists());
    assert!(store.load().is_none());

    // Clearing an already-missing session is a no-op
    store.clear().unwrap();
}

#[test]
fn corrupt_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path(), "session.json");

    std::fs::write(store.path(), "{not json").unwrap();
    assert!(store.exists());
    assert!(store.load().is_none());
}

#[test]
fn nested_directory_is_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("state/console"), "session.json");

    store
        .save(&Session {
            user: user(),
            token: "t".to_string(),
        })
        .unwrap();
    assert!(store.exists());
}
