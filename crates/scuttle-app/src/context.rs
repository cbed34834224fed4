//! 어댑터 생성 및 DI 와이어링.

use anyhow::{Context, Result};
use scuttle_core::config::AppConfig;
use scuttle_core::config_manager::ConfigManager;
use scuttle_core::ports::local_store::LocalStore;
use scuttle_storage::memory::MemoryLocalStore;
use scuttle_storage::scuttle_store::ScuttleStore;
use scuttle_storage::sqlite::SqliteLocalStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 실행에 필요한 공유 객체 묶음
pub struct AppContext {
    pub config: ConfigManager,
    pub local_store: Arc<dyn LocalStore>,
    pub store: Arc<ScuttleStore>,
}

/// 저장소 선택
pub enum StoreLocation {
    /// 디렉토리 안의 SQLite 파일 (`None`이면 플랫폼 기본 데이터 디렉토리)
    Disk(Option<PathBuf>),
    /// 프로세스 메모리 (종료 시 사라짐)
    Ephemeral,
}

impl AppContext {
    pub fn build(config_path: Option<&Path>, location: StoreLocation) -> Result<Self> {
        let config = match config_path {
            Some(path) => ConfigManager::with_path(path.to_path_buf()),
            None => ConfigManager::new(),
        }
        .context("설정 로드 실패")?;
        let app_config = config.get();

        let local_store = open_local_store(&app_config, location)?;
        let store = Arc::new(ScuttleStore::load(
            Arc::clone(&local_store),
            app_config.storage.namespace.clone(),
        ));

        Ok(Self {
            config,
            local_store,
            store,
        })
    }
}

fn open_local_store(config: &AppConfig, location: StoreLocation) -> Result<Arc<dyn LocalStore>> {
    match location {
        StoreLocation::Ephemeral => {
            info!("인메모리 저장소 사용");
            Ok(Arc::new(MemoryLocalStore::new()))
        }
        StoreLocation::Disk(dir) => {
            let dir = match dir {
                Some(dir) => dir,
                None => ConfigManager::data_dir()?,
            };
            let path = dir.join(&config.storage.file_name);
            let store = SqliteLocalStore::open(&path)
                .with_context(|| format!("로컬 저장소 열기 실패: {}", path.display()))?;
            info!("로컬 저장소: {}", path.display());
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn disk_store_persists_target_between_builds() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let data = || StoreLocation::Disk(Some(dir.path().join("data")));

        let ctx = AppContext::build(Some(&config_path), data()).unwrap();
        ctx.store.set_target_server("eu-west-3");
        drop(ctx);

        let ctx = AppContext::build(Some(&config_path), data()).unwrap();
        assert_eq!(ctx.store.target_server(), "eu-west-3");
        assert!(!ctx.store.running());
    }

    #[test]
    fn ephemeral_store_starts_empty() {
        let dir = TempDir::new().unwrap();
        let ctx =
            AppContext::build(Some(&dir.path().join("config.json")), StoreLocation::Ephemeral)
                .unwrap();
        assert_eq!(ctx.store.target_server(), "");
        assert!(ctx.local_store.keys().unwrap().is_empty());
    }

    #[test]
    fn namespace_comes_from_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"storage":{"namespace":"alt"}}"#).unwrap();

        let ctx = AppContext::build(Some(&config_path), StoreLocation::Ephemeral).unwrap();
        ctx.store.set_target_server("x");
        assert_eq!(ctx.local_store.keys().unwrap(), vec!["alt:user-store".to_string()]);
    }
}
