//! 애플리케이션 설정 구조체.
//!
//! 로컬 저장소 위치와 자동 스커틀 타이밍을 정의한다.
//! `ConfigManager`를 통해 JSON 파일에서 로드/저장된다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 자동 스커틀 설정
    #[serde(default)]
    pub scuttle: ScuttleConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 로컬 키-값 저장소 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 저장 키 앞에 붙는 네임스페이스 (`<namespace>:<key>`)
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// 데이터 디렉토리 안의 SQLite 저장소 파일 이름
    #[serde(default = "default_store_file")]
    pub file_name: String,
}

fn default_namespace() -> String {
    "scuttle".to_string()
}

fn default_store_file() -> String {
    "local_store.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            file_name: default_store_file(),
        }
    }
}

// ============================================================
// 자동 스커틀 설정
// ============================================================

/// 자동 스커틀 루프 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScuttleConfig {
    /// 스커틀 메뉴를 여는 키 이름
    #[serde(default = "default_trigger_key")]
    pub trigger_key: String,
    /// 키를 누르고 있는 시간 (밀리초)
    #[serde(default = "default_key_hold_ms")]
    pub key_hold_ms: u64,
    /// 스커틀 후 서버 이동을 기다리는 시간 (밀리초)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// 다음 시도 전 대기 시간 (밀리초)
    #[serde(default = "default_retry_pause_ms")]
    pub retry_pause_ms: u64,
    /// 최대 시도 횟수
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_trigger_key() -> String {
    "left".to_string()
}

fn default_key_hold_ms() -> u64 {
    100
}

fn default_settle_ms() -> u64 {
    90_000
}

fn default_retry_pause_ms() -> u64 {
    5_000
}

fn default_max_attempts() -> u32 {
    10
}

impl Default for ScuttleConfig {
    fn default() -> Self {
        Self {
            trigger_key: default_trigger_key(),
            key_hold_ms: default_key_hold_ms(),
            settle_ms: default_settle_ms(),
            retry_pause_ms: default_retry_pause_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ScuttleConfig {
    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms)
    }
}
