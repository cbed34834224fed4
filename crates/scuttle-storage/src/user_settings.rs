//! `UserSettings` 타입 지정 접근자.
//!
//! 상태를 갖지 않는 얇은 뷰. 접근할 때마다 새로 만들어도 된다.

use scuttle_core::models::settings::UserSettings;
use scuttle_core::ports::local_store::LocalStore;
use std::sync::Arc;

use crate::keys::LocalKey;
use crate::local_value::LocalValue;

/// `LocalKey::UserStore` 키에 묶인 사용자 설정 접근자
pub struct UserSettingsStore {
    inner: LocalValue<Option<UserSettings>>,
}

impl UserSettingsStore {
    pub fn new(store: Arc<dyn LocalStore>, namespace: &str) -> Self {
        Self {
            inner: LocalValue::for_key(store, LocalKey::UserStore, namespace, None),
        }
    }

    /// 저장된 설정. 저장된 적이 없거나 읽을 수 없으면 `None`.
    pub fn value(&self) -> Option<UserSettings> {
        self.inner.value()
    }

    /// 설정을 그대로 저장 (검증 없음)
    pub fn set_value(&self, settings: &UserSettings) {
        self.inner.set_value(&Some(settings.clone()));
    }
}
