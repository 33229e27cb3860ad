// ==========================================
// 产线平衡优化引擎 - 配置管理器
// ==========================================
// 职责: 引擎参数加载、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::engine_profile::EngineProfile;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// 配置键
pub mod config_keys {
    pub const ENGINE_PROFILE: &str = "line_balance/engine_profile";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e))
        })?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager（幂等建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取引擎参数覆写
    pub fn get_engine_profile(&self) -> RepositoryResult<Option<EngineProfile>> {
        let raw = match self.get_global_config_value(config_keys::ENGINE_PROFILE)? {
            Some(v) => v,
            None => return Ok(None),
        };

        let profile: EngineProfile = serde_json::from_str(&raw)?;
        Ok(Some(profile))
    }

    /// 保存引擎参数覆写（保存前校验叠加后的配置）
    pub fn save_engine_profile(&self, profile: &EngineProfile) -> RepositoryResult<()> {
        let merged = profile.apply_to(EngineConfig::default());
        merged
            .validate()
            .map_err(|(field, message)| RepositoryError::FieldValueError {
                field: field.to_string(),
                message,
            })?;

        let raw = serde_json::to_string(profile)?;
        self.set_global_config_value(config_keys::ENGINE_PROFILE, &raw)
    }

    /// 加载引擎配置（默认值 + 覆写）
    ///
    /// 覆写不存在时返回默认配置；覆写叠加后不合法时返回 FieldValueError
    pub fn load_engine_config(&self) -> RepositoryResult<EngineConfig> {
        let config = match self.get_engine_profile()? {
            Some(profile) => {
                debug!(?profile, "加载引擎参数覆写");
                profile.apply_to(EngineConfig::default())
            }
            None => EngineConfig::default(),
        };

        if let Err((field, message)) = config.validate() {
            warn!(field, %message, "引擎参数覆写不合法");
            return Err(RepositoryError::FieldValueError {
                field: field.to_string(),
                message,
            });
        }
        Ok(config)
    }
}
