//! SCUTTLE 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 `CoreError`를 그대로 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 저장소, 설정, 자동화 실행 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 로컬 저장소 접근 실패 (파일 손상, 쓰기 실패 등)
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 인자
    #[error("잘못된 인자: {0}")]
    InvalidArguments(String),

    /// 이미 실행 중인 작업을 다시 시작하려 함
    #[error("이미 실행 중")]
    AlreadyRunning,

    /// 입력 시뮬레이션 실패
    #[error("입력 에러: {0}")]
    Input(String),

    /// 현재 서버 조회 실패
    #[error("서버 조회 에러: {0}")]
    Probe(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}
