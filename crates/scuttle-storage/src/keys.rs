//! 로컬 저장소 키.

use std::fmt;

/// 알려진 저장 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalKey {
    /// 사용자 설정 (`UserSettings`)
    UserStore,
}

impl LocalKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserStore => "user-store",
        }
    }

    /// `<namespace>:<key>` 형태의 실제 저장 키
    pub fn namespaced(&self, namespace: &str) -> String {
        if namespace.is_empty() {
            self.as_str().to_string()
        } else {
            format!("{namespace}:{}", self.as_str())
        }
    }
}

impl fmt::Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
