//! 현재 서버 조회 구현.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use scuttle_core::error::CoreError;
use scuttle_core::ports::server_probe::ServerProbe;

/// 게임 클라이언트 연동이 없을 때 쓰는 폴백 조회기
///
/// 현재 시각에서 `server-<unix 초 % 1000>` 형태의 가짜 식별자를 만든다.
pub struct ClockServerProbe;

#[async_trait]
impl ServerProbe for ClockServerProbe {
    async fn current_server(&self) -> Result<String, CoreError> {
        let server = format!("server-{}", Utc::now().timestamp().rem_euclid(1000));
        debug!(%server, "[Clock] 현재 서버");
        Ok(server)
    }

    fn name(&self) -> &str {
        "clock"
    }
}

/// 고정된 서버를 보고하는 조회기
pub struct FixedServerProbe {
    server: String,
}

impl FixedServerProbe {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }
}

#[async_trait]
impl ServerProbe for FixedServerProbe {
    async fn current_server(&self) -> Result<String, CoreError> {
        if self.server.is_empty() {
            return Err(CoreError::Probe("서버 감지 안 됨".to_string()));
        }
        Ok(self.server.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
