//! 로컬 저장소 → 스커틀 상태 통합 테스트.
//!
//! 실제 SQLite 파일을 열고 닫으며 목표 서버가 유지되는지 검증.

use parking_lot::Mutex;
use scuttle_core::models::settings::UserSettings;
use scuttle_core::ports::local_store::LocalStore;
use scuttle_storage::scuttle_store::ScuttleStore;
use scuttle_storage::sqlite::SqliteLocalStore;
use scuttle_storage::user_settings::UserSettingsStore;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const NS: &str = "scuttle";

fn open(path: &Path) -> Arc<dyn LocalStore> {
    Arc::new(SqliteLocalStore::open(path).unwrap())
}

#[test]
fn set_target_then_read_from_fresh_connection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_store.db");

    let state = ScuttleStore::load(open(&path), NS);
    assert_eq!(state.target_server(), "");

    state.set_target_server("scuttle.example:8080");
    assert_eq!(state.target_server(), "scuttle.example:8080");

    // 별도 연결로 같은 파일을 읽는다
    let fresh = UserSettingsStore::new(open(&path), NS).value().unwrap();
    assert_eq!(fresh.target_server.as_deref(), Some("scuttle.example:8080"));
}

#[test]
fn target_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("local_store.db");

    {
        let state = ScuttleStore::load(open(&path), NS);
        state.set_running(true);
        state.set_target_server("kr-1");
    }

    let state = ScuttleStore::load(open(&path), NS);
    assert_eq!(state.target_server(), "kr-1");
    // 실행 여부는 저장되지 않는다
    assert!(!state.running());
}

#[test]
fn seeded_record_keeps_unknown_fields_across_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_store.db");

    let mut seed = UserSettings::with_target_server("old");
    seed.extra
        .insert("theme".to_string(), serde_json::json!("dark"));
    UserSettingsStore::new(open(&path), NS).set_value(&seed);

    let state = ScuttleStore::load(open(&path), NS);
    assert_eq!(state.target_server(), "old");
    state.set_target_server("new");

    let stored = UserSettingsStore::new(open(&path), NS).value().unwrap();
    assert_eq!(stored.target_server.as_deref(), Some("new"));
    assert_eq!(stored.extra["theme"], "dark");
}

#[test]
fn malformed_record_falls_back_to_empty_target() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_store.db");
    open(&path).set_item("scuttle:user-store", "{not json").unwrap();

    let state = ScuttleStore::load(open(&path), NS);
    assert_eq!(state.target_server(), "");

    // 다음 쓰기가 손상된 레코드를 덮어쓴다
    state.set_target_server("eu-1");
    let stored = UserSettingsStore::new(open(&path), NS).value().unwrap();
    assert_eq!(stored.target_server.as_deref(), Some("eu-1"));
}

#[test]
fn repeated_set_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_store.db");
    let store = open(&path);
    let state = ScuttleStore::load(Arc::clone(&store), NS);

    state.set_target_server("a");
    let first = store.get_item("scuttle:user-store").unwrap();
    state.set_target_server("a");
    let second = store.get_item("scuttle:user-store").unwrap();

    assert_eq!(first, second);
    assert_eq!(store.keys().unwrap(), vec!["scuttle:user-store".to_string()]);
}

#[test]
fn observers_see_setter_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_store.db");
    let state = ScuttleStore::load(open(&path), NS);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    state.subscribe_target_server(move |s| sink.lock().push(s.clone()));

    state.set_target_server("na-2");
    assert_eq!(*seen.lock(), vec!["na-2".to_string()]);
    assert!(!state.running());
}
