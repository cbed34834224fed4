//! # scuttle-automation
//!
//! 자동 스커틀 크레이트.
//! 트리거 키 입력으로 현재 서버를 떠나고, 일정 시간 후 접속 서버를 확인해
//! 목표 서버에 도달하거나 최대 시도 횟수를 넘을 때까지 반복한다.
//! 실행 여부는 공유된 `ScuttleStore`의 `running` 필드로 관리된다.

pub mod controller;
pub mod event_bus;
pub mod input_driver;
pub mod probe;
