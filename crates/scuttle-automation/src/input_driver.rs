//! 입력 드라이버 구현.
//!
//! `NoOpInputDriver` (테스트용)와 `EnigoInputDriver` (실제 입력, `enigo` feature)를 제공한다.

use async_trait::async_trait;
use tracing::debug;

use scuttle_core::error::CoreError;
use scuttle_core::ports::input_driver::InputDriver;

// ============================================================
// NoOpInputDriver: 테스트/디버깅용
// ============================================================

/// No-Op 입력 드라이버: 모든 입력을 로깅만 하고 실행하지 않음
pub struct NoOpInputDriver;

#[async_trait]
impl InputDriver for NoOpInputDriver {
    async fn key_press(&self, key: &str) -> Result<(), CoreError> {
        debug!(key, "[NoOp] 키 누름");
        Ok(())
    }

    async fn key_release(&self, key: &str) -> Result<(), CoreError> {
        debug!(key, "[NoOp] 키 놓음");
        Ok(())
    }

    fn platform(&self) -> &str {
        "noop"
    }
}

// ============================================================
// EnigoInputDriver: 실제 키보드 입력
// ============================================================

/// 실제 키보드 입력 드라이버 (enigo 기반)
///
/// macOS: Accessibility 권한 필요
/// Windows: 게임 창이 관리자 권한이면 같은 권한 필요
/// Linux: X11 또는 Wayland + uinput 권한 필요
#[cfg(feature = "enigo")]
pub struct EnigoInputDriver {
    /// enigo 인스턴스 (Send지만 !Sync → tokio::sync::Mutex 사용)
    enigo: tokio::sync::Mutex<enigo::Enigo>,
}

#[cfg(feature = "enigo")]
impl EnigoInputDriver {
    pub fn new() -> Result<Self, CoreError> {
        let settings = enigo::Settings::default();
        let enigo = enigo::Enigo::new(&settings)
            .map_err(|e| CoreError::Input(format!("입력 드라이버 초기화 실패: {e}")))?;
        Ok(Self {
            enigo: tokio::sync::Mutex::new(enigo),
        })
    }

    /// 문자열 → enigo 키 매핑
    fn parse_key(key: &str) -> Result<enigo::Key, CoreError> {
        let key = match key.to_lowercase().as_str() {
            "left" | "leftarrow" => enigo::Key::LeftArrow,
            "right" | "rightarrow" => enigo::Key::RightArrow,
            "up" | "uparrow" => enigo::Key::UpArrow,
            "down" | "downarrow" => enigo::Key::DownArrow,
            "enter" | "return" => enigo::Key::Return,
            "escape" | "esc" => enigo::Key::Escape,
            "space" => enigo::Key::Space,
            "tab" => enigo::Key::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => enigo::Key::Unicode(ch),
                    _ => return Err(CoreError::Input(format!("알 수 없는 키: {other}"))),
                }
            }
        };
        Ok(key)
    }
}

#[cfg(feature = "enigo")]
#[async_trait]
impl InputDriver for EnigoInputDriver {
    async fn key_press(&self, key: &str) -> Result<(), CoreError> {
        use enigo::Keyboard;
        debug!(key, "[Enigo] 키 누름");
        let parsed = Self::parse_key(key)?;
        let mut enigo = self.enigo.lock().await;
        enigo
            .key(parsed, enigo::Direction::Press)
            .map_err(|e| CoreError::Input(format!("키 누름 실패: {e}")))?;
        Ok(())
    }

    async fn key_release(&self, key: &str) -> Result<(), CoreError> {
        use enigo::Keyboard;
        debug!(key, "[Enigo] 키 놓음");
        let parsed = Self::parse_key(key)?;
        let mut enigo = self.enigo.lock().await;
        enigo
            .key(parsed, enigo::Direction::Release)
            .map_err(|e| CoreError::Input(format!("키 놓음 실패: {e}")))?;
        Ok(())
    }

    fn platform(&self) -> &str {
        std::env::consts::OS
    }
}

/// 플랫폼별 입력 드라이버 생성 팩토리
///
/// `enigo` feature 활성화 시 실제 입력 드라이버 반환,
/// 비활성화되었거나 초기화에 실패하면 NoOp 드라이버 반환.
pub fn create_platform_input_driver() -> Box<dyn InputDriver> {
    #[cfg(feature = "enigo")]
    {
        match EnigoInputDriver::new() {
            Ok(driver) => {
                tracing::info!("실제 입력 드라이버 (enigo) 초기화 완료");
                return Box::new(driver);
            }
            Err(e) => {
                tracing::warn!("enigo 초기화 실패, NoOp 폴백: {e}");
            }
        }
    }
    Box::new(NoOpInputDriver)
}
