//! 입력 드라이버 포트.
//!
//! 스커틀 메뉴 호출을 위한 키보드 시뮬레이션 인터페이스를 정의한다.

use async_trait::async_trait;

use crate::error::CoreError;

/// 입력 드라이버: 키보드 시뮬레이션 인터페이스
///
/// 구현체: `EnigoInputDriver` (실제 입력), `NoOpInputDriver` (테스트용)
#[async_trait]
pub trait InputDriver: Send + Sync {
    /// 키 누름
    async fn key_press(&self, key: &str) -> Result<(), CoreError>;

    /// 키 놓음
    async fn key_release(&self, key: &str) -> Result<(), CoreError>;

    /// 플랫폼 이름 (예: "macos", "windows", "linux")
    fn platform(&self) -> &str;
}
