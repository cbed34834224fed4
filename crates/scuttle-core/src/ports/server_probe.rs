//! 현재 서버 조회 포트.

use async_trait::async_trait;

use crate::error::CoreError;

/// 지금 접속 중인 서버 식별자를 알려주는 인터페이스
///
/// 서버를 감지하지 못하면 `CoreError::Probe`를 반환한다.
#[async_trait]
pub trait ServerProbe: Send + Sync {
    async fn current_server(&self) -> Result<String, CoreError>;

    /// 구현체 이름 (로그용)
    fn name(&self) -> &str;
}
