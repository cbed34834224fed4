//! SQLite 키-값 저장소 어댑터.
//!
//! `LocalStore` 포트 구현. 모든 변경은 즉시 디스크에 기록된다.

use rusqlite::{Connection, OptionalExtension};
use scuttle_core::error::CoreError;
use scuttle_core::ports::local_store::LocalStore;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS local_store (
        key   TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    );
";

/// SQLite 저장소: `LocalStore` 포트 구현
pub struct SqliteLocalStore {
    conn: Mutex<Connection>,
}

impl SqliteLocalStore {
    /// 파일 기반 SQLite 저장소 생성
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Storage(format!("저장소 디렉토리 생성 실패: {}: {e}", parent.display()))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| CoreError::Storage(format!("SQLite 열기 실패: {e}")))?;
        Self::init(&conn)?;

        info!("로컬 저장소 초기화: {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init(conn: &Connection) -> Result<(), CoreError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| CoreError::Storage(format!("스키마 생성 실패: {e}")))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|e| CoreError::Internal(format!("잠금 획득 실패: {e}")))
    }
}

impl LocalStore for SqliteLocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM local_store WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| CoreError::Storage(format!("값 조회 실패: {key}: {e}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO local_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )
        .map_err(|e| CoreError::Storage(format!("값 저장 실패: {key}: {e}")))?;
        debug!(key, bytes = value.len(), "로컬 저장소 쓰기");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM local_store WHERE key = ?1",
            rusqlite::params![key],
        )
        .map_err(|e| CoreError::Storage(format!("값 삭제 실패: {key}: {e}")))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT key FROM local_store ORDER BY key")
            .map_err(|e| CoreError::Storage(format!("쿼리 준비 실패: {e}")))?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| CoreError::Storage(format!("키 조회 실패: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::Storage(format!("키 조회 실패: {e}")))?;
        Ok(keys)
    }
}
