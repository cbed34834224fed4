//! 사용자 설정 모델.
//!
//! 로컬 저장소의 단일 키 아래 JSON 객체로 영속화된다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 영속화되는 사용자 설정
///
/// 이 버전이 모르는 필드는 `extra`에 그대로 보존되어,
/// 병합 후 다시 쓸 때 사라지지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// 목표 서버 주소 (형식 검증 없음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_server: Option<String>,
    /// 알 수 없는 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSettings {
    pub fn with_target_server(server: impl Into<String>) -> Self {
        Self {
            target_server: Some(server.into()),
            extra: Map::new(),
        }
    }

    /// 기존 설정에 목표 서버만 덮어쓴 새 레코드
    pub fn merged_with_target_server(mut self, server: impl Into<String>) -> Self {
        self.target_server = Some(server.into());
        self
    }
}
