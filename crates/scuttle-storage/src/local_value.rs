//! 범용 저장 값 래퍼.
//!
//! 하나의 키에 묶인 타입 지정 값. JSON 직렬화/역직렬화를 대신 처리하고,
//! 값이 없거나 읽을 수 없으면 생성 시 받은 기본값을 돌려준다.

use scuttle_core::error::CoreError;
use scuttle_core::ports::local_store::LocalStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

use crate::keys::LocalKey;

/// 로컬 저장소의 한 키에 저장되는 값
pub struct LocalValue<T> {
    store: Arc<dyn LocalStore>,
    key: String,
    default: T,
}

impl<T> LocalValue<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(store: Arc<dyn LocalStore>, key: impl Into<String>, default: T) -> Self {
        Self {
            store,
            key: key.into(),
            default,
        }
    }

    /// 네임스페이스가 붙은 알려진 키로 생성
    pub fn for_key(store: Arc<dyn LocalStore>, key: LocalKey, namespace: &str, default: T) -> Self {
        Self::new(store, key.namespaced(namespace), default)
    }

    /// 저장된 값 조회
    ///
    /// - 값 없음 → `Ok(None)`
    /// - JSON 손상 → `Err(CoreError::Serialization)`
    /// - 저장소 접근 실패 → 저장소가 반환한 에러
    pub fn try_value(&self) -> Result<Option<T>, CoreError> {
        match self.store.get_item(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// 저장된 값, 없거나 읽을 수 없으면 기본값
    pub fn value(&self) -> T {
        match self.try_value() {
            Ok(Some(value)) => value,
            Ok(None) => self.default.clone(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "저장된 값을 읽을 수 없어 기본값 사용");
                self.default.clone()
            }
        }
    }

    /// 값 직렬화 후 저장
    pub fn try_set_value(&self, value: &T) -> Result<(), CoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(&self.key, &raw)
    }

    /// 값 저장. 실패는 로그만 남긴다.
    pub fn set_value(&self, value: &T) {
        if let Err(e) = self.try_set_value(value) {
            error!(key = %self.key, error = %e, "값 저장 실패");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLocalStore;
    use std::collections::BTreeMap;

    /// 항상 실패하는 저장소
    struct BrokenStore;

    impl LocalStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, CoreError> {
            Err(CoreError::Storage("unavailable".to_string()))
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("unavailable".to_string()))
        }
        fn remove_item(&self, _key: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("unavailable".to_string()))
        }
        fn keys(&self) -> Result<Vec<String>, CoreError> {
            Err(CoreError::Storage("unavailable".to_string()))
        }
    }

    fn counter(store: Arc<dyn LocalStore>) -> LocalValue<BTreeMap<String, u32>> {
        LocalValue::new(store, "ns:counter", BTreeMap::new())
    }

    #[test]
    fn absent_value_yields_default() {
        let value = counter(Arc::new(MemoryLocalStore::new()));
        assert!(value.try_value().unwrap().is_none());
        assert!(value.value().is_empty());
    }

    #[test]
    fn stored_value_round_trips_through_json() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
        let value = counter(Arc::clone(&store));

        let mut map = BTreeMap::new();
        map.insert("hits".to_string(), 3);
        value.set_value(&map);

        assert_eq!(store.get_item("ns:counter").unwrap().as_deref(), Some(r#"{"hits":3}"#));
        assert_eq!(value.value(), map);
    }

    #[test]
    fn malformed_json_is_distinguished_from_absent() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
        store.set_item("ns:counter", "{broken").unwrap();
        let value = counter(store);

        assert!(matches!(value.try_value(), Err(CoreError::Serialization(_))));
        assert!(value.value().is_empty());
    }

    #[test]
    fn unavailable_store_falls_back_and_swallows_writes() {
        let value = counter(Arc::new(BrokenStore));
        assert!(matches!(value.try_value(), Err(CoreError::Storage(_))));
        assert!(value.value().is_empty());

        // 에러를 호출자에게 전달하지 않는다
        value.set_value(&BTreeMap::new());
        assert!(value.try_set_value(&BTreeMap::new()).is_err());
    }

    #[test]
    fn known_key_is_namespaced() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
        let value = LocalValue::for_key(Arc::clone(&store), LocalKey::UserStore, "test", 0u32);
        value.set_value(&9);

        assert_eq!(store.keys().unwrap(), vec!["test:user-store".to_string()]);
        assert_eq!(value.value(), 9);
    }
}
