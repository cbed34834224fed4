//! 스커틀 상태 및 이벤트 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 반응형 스커틀 상태의 스냅샷
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScuttleState {
    /// 목표 서버 (저장된 값이 없으면 빈 문자열)
    pub target_server: String,
    /// 자동 스커틀 실행 여부
    pub running: bool,
}

/// 자동 스커틀 제어기 상태
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScuttleStatus {
    pub running: bool,
    /// 현재 실행에서 소비한 시도 횟수
    pub attempts: u32,
    /// 현재 실행의 목표 서버
    pub target_server: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

/// 자동 스커틀 진행 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScuttleEvent {
    /// 실행 시작
    Started { target_server: String },
    /// 새 시도 시작
    Attempt { attempt: u32 },
    /// 시도 후 확인된 현재 서버
    ServerObserved { attempt: u32, server: String },
    /// 목표 서버 도달
    TargetReached { server: String, attempts: u32 },
    /// 최대 시도 횟수 초과
    MaxAttemptsReached { attempts: u32 },
    /// 사용자 중지
    Stopped,
}

impl ScuttleEvent {
    /// 실행을 끝내는 이벤트인지
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::TargetReached { .. } | Self::MaxAttemptsReached { .. } | Self::Stopped
        )
    }
}
