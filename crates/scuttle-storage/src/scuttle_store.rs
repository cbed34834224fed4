//! 반응형 스커틀 상태 저장소.
//!
//! 목표 서버와 실행 여부 두 필드를 관찰 가능한 값으로 보관한다.
//! 목표 서버는 생성 시 로컬 저장소에서 한 번 읽어 초기화하고,
//! 이후에는 [`ScuttleStore::set_target_server`]로만 바뀐다.
//! 실행 여부는 항상 `false`로 시작하며 자동 스커틀 제어기가 관리한다.

use scuttle_core::models::scuttle::ScuttleState;
use scuttle_core::observable::{Observable, SubscriptionId};
use scuttle_core::ports::local_store::LocalStore;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::user_settings::UserSettingsStore;

/// 스커틀 상태 저장소
pub struct ScuttleStore {
    target_server: Observable<String>,
    running: Observable<bool>,
    local_store: Arc<dyn LocalStore>,
    namespace: String,
}

impl ScuttleStore {
    /// 저장된 설정으로 상태 초기화 (저장소 읽기 1회)
    pub fn load(local_store: Arc<dyn LocalStore>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let target_server = UserSettingsStore::new(Arc::clone(&local_store), &namespace)
            .value()
            .and_then(|s| s.target_server)
            .unwrap_or_default();
        debug!(%target_server, "스커틀 상태 초기화");

        Self {
            target_server: Observable::new(target_server),
            running: Observable::new(false),
            local_store,
            namespace,
        }
    }

    fn settings(&self) -> UserSettingsStore {
        UserSettingsStore::new(Arc::clone(&self.local_store), &self.namespace)
    }

    pub fn target_server(&self) -> String {
        self.target_server.get()
    }

    pub fn running(&self) -> bool {
        self.running.get()
    }

    pub fn snapshot(&self) -> ScuttleState {
        ScuttleState {
            target_server: self.target_server(),
            running: self.running(),
        }
    }

    /// 목표 서버 변경
    ///
    /// 메모리 값을 먼저 바꿔 구독자에게 알린 뒤, 저장된 설정에
    /// 새 목표 서버를 병합해 다시 쓴다. 다른 설정 필드는 보존된다.
    pub fn set_target_server(&self, server: &str) {
        self.target_server.set(server.to_string());

        let settings = self.settings();
        let merged = settings
            .value()
            .unwrap_or_default()
            .merged_with_target_server(server);
        settings.set_value(&merged);
        debug!(target_server = server, "목표 서버 저장");
    }

    /// 실행 여부 변경. 값이 실제로 바뀌었으면 `true`.
    ///
    /// 비교와 교체가 한 번의 잠금 안에서 일어나므로
    /// `set_running(true)`가 `true`를 반환한 호출자만 실행을 시작한 것이다.
    pub fn set_running(&self, running: bool) -> bool {
        self.running.set(running)
    }

    pub fn subscribe_target_server<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.target_server.subscribe(callback)
    }

    pub fn subscribe_running<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.running.subscribe(callback)
    }

    pub fn unsubscribe_target_server(&self, id: SubscriptionId) -> bool {
        self.target_server.unsubscribe(id)
    }

    pub fn unsubscribe_running(&self, id: SubscriptionId) -> bool {
        self.running.unsubscribe(id)
    }
}

impl fmt::Debug for ScuttleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScuttleStore")
            .field("target_server", &self.target_server)
            .field("running", &self.running)
            .field("namespace", &self.namespace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLocalStore;
    use parking_lot::Mutex;
    use scuttle_core::models::settings::UserSettings;

    fn memory() -> Arc<dyn LocalStore> {
        Arc::new(MemoryLocalStore::new())
    }

    #[test]
    fn seeds_target_from_storage() {
        let store = memory();
        UserSettingsStore::new(Arc::clone(&store), "scuttle")
            .set_value(&UserSettings::with_target_server("X"));

        let state = ScuttleStore::load(store, "scuttle");
        assert_eq!(state.target_server(), "X");
        assert!(!state.running());
    }

    #[test]
    fn defaults_to_empty_target() {
        let state = ScuttleStore::load(memory(), "scuttle");
        assert_eq!(state.snapshot(), ScuttleState::default());
    }

    #[test]
    fn setter_updates_memory_and_storage() {
        let store = memory();
        let state = ScuttleStore::load(Arc::clone(&store), "scuttle");

        state.set_target_server("scuttle.example:8080");

        assert_eq!(state.target_server(), "scuttle.example:8080");
        let fresh = UserSettingsStore::new(store, "scuttle").value().unwrap();
        assert_eq!(fresh.target_server.as_deref(), Some("scuttle.example:8080"));
    }

    #[test]
    fn setter_is_idempotent() {
        let store = memory();
        let state = ScuttleStore::load(Arc::clone(&store), "scuttle");

        state.set_target_server("a");
        let once = (state.snapshot(), store.get_item("scuttle:user-store").unwrap());
        state.set_target_server("a");
        let twice = (state.snapshot(), store.get_item("scuttle:user-store").unwrap());

        assert_eq!(once, twice);
    }

    #[test]
    fn setter_never_touches_running() {
        let state = ScuttleStore::load(memory(), "scuttle");
        assert!(state.set_running(true));
        state.set_target_server("b");
        assert!(state.running());
        assert!(!state.set_running(true));
    }

    #[test]
    fn setter_preserves_other_persisted_fields() {
        let store = memory();
        store
            .set_item("scuttle:user-store", r#"{"targetServer":"old","volume":7}"#)
            .unwrap();
        let state = ScuttleStore::load(Arc::clone(&store), "scuttle");
        assert_eq!(state.target_server(), "old");

        state.set_target_server("new");

        let raw: serde_json::Value =
            serde_json::from_str(&store.get_item("scuttle:user-store").unwrap().unwrap()).unwrap();
        assert_eq!(raw["targetServer"], "new");
        assert_eq!(raw["volume"], 7);
    }

    #[test]
    fn subscribers_see_each_change_once() {
        let state = ScuttleStore::load(memory(), "scuttle");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = state.subscribe_target_server(move |s| sink.lock().push(s.clone()));

        state.set_target_server("one");
        state.set_target_server("one");
        state.set_target_server("two");
        assert!(state.unsubscribe_target_server(id));
        state.set_target_server("three");

        assert_eq!(*seen.lock(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn running_subscription() {
        let state = ScuttleStore::load(memory(), "scuttle");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        state.subscribe_running(move |r| sink.lock().push(*r));

        state.set_running(true);
        state.set_running(false);
        assert_eq!(*seen.lock(), vec![true, false]);
    }
}
