//! # scuttle-storage
//!
//! 로컬 저장소 어댑터와 그 위에 올라가는 스커틀 상태 저장소.
//!
//! ## 모듈
//! - `sqlite`: SQLite 키-값 저장소 (LocalStore 구현)
//! - `memory`: 인메모리 키-값 저장소 (테스트, 임시 실행)
//! - `keys`: 네임스페이스 저장 키
//! - `local_value`: 직렬화/기본값 처리를 하는 범용 저장 값 래퍼
//! - `user_settings`: `UserSettings` 타입 지정 접근자
//! - `scuttle_store`: 반응형 스커틀 상태와 목표 서버 설정 함수

pub mod keys;
pub mod local_value;
pub mod memory;
pub mod scuttle_store;
pub mod sqlite;
pub mod user_settings;
