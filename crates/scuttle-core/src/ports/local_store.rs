//! 로컬 키-값 저장소 포트.
//!
//! 브라우저 localStorage와 같은 문자열 키-값 저장소.
//! 구현: `scuttle-storage` crate (SQLite, 메모리)

use crate::error::CoreError;

/// 동기 문자열 키-값 저장소
pub trait LocalStore: Send + Sync {
    /// 키의 값 조회 (없으면 `None`)
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// 키에 값 저장 (기존 값 덮어씀)
    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// 키 삭제 (없는 키는 무시)
    fn remove_item(&self, key: &str) -> Result<(), CoreError>;

    /// 저장된 모든 키
    fn keys(&self) -> Result<Vec<String>, CoreError>;
}
