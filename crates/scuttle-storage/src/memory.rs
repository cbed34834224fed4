//! 인메모리 키-값 저장소.

use parking_lot::RwLock;
use scuttle_core::error::CoreError;
use scuttle_core::ports::local_store::LocalStore;
use std::collections::BTreeMap;

/// 프로세스 안에서만 유지되는 `LocalStore` 구현
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        self.items.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.items.read().keys().cloned().collect())
    }
}
