//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터 crate가 이 trait들을 구현하며,
//! `scuttle-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 로컬 저장소는 동기 trait, 입력/서버 조회는 `async_trait`을 사용한다.

pub mod input_driver;
pub mod local_store;
pub mod server_probe;
