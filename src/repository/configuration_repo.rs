// ==========================================
// 产线平衡优化引擎 - 平衡配置历史仓储
// ==========================================
// 职责: 管理 line_balance_configuration 表
// 红线: 只追加/删除，不提供更新接口（表上另有触发器拒绝 UPDATE）
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::configuration::Configuration;
use crate::domain::types::OptimizationType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT config_id, part_number_id, head_count, run_rate,
           bottleneck_name, strategy, created_at
    FROM line_balance_configuration
"#;

pub struct ConfigurationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigurationRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e))
        })?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        ensure_schema(&conn)?;
        Ok(())
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 追加一条配置
    ///
    /// # 返回
    /// - `Ok(config_id)`
    /// - `Err(UniqueConstraintViolation)`: config_id 重复
    pub fn insert(&self, configuration: &Configuration) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO line_balance_configuration (
                config_id, part_number_id, head_count, run_rate,
                bottleneck_name, strategy, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                configuration.id,
                configuration.part_number_id,
                configuration.head_count,
                configuration.run_rate,
                configuration.bottleneck_name,
                configuration.strategy.as_str(),
                configuration.created_at.to_rfc3339(),
            ],
        )?;
        Ok(configuration.id.clone())
    }

    /// 删除一条配置（无级联）
    ///
    /// # 返回
    /// - `Err(NotFound)`: 配置不存在
    pub fn delete(&self, config_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM line_balance_configuration WHERE config_id = ?1",
            params![config_id],
        )?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Configuration".to_string(),
                id: config_id.to_string(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 查询操作
    // ==========================================

    pub fn find_by_id(&self, config_id: &str) -> RepositoryResult<Option<Configuration>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE config_id = ?1", SELECT_COLUMNS);
        let raw = conn
            .query_row(&sql, params![config_id], map_raw_row)
            .optional()?;
        raw.map(RawConfiguration::into_domain).transpose()
    }

    /// 按料号列出全部配置（按创建顺序）
    pub fn list_by_part_number(&self, part_number_id: &str) -> RepositoryResult<Vec<Configuration>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE part_number_id = ?1 ORDER BY seq ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![part_number_id], map_raw_row)?;

        let mut configurations = Vec::new();
        for row in rows {
            configurations.push(row?.into_domain()?);
        }
        Ok(configurations)
    }

    pub fn count_by_part_number(&self, part_number_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM line_balance_configuration WHERE part_number_id = ?1",
            params![part_number_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

// ==========================================
// 行映射
// ==========================================

/// 数据库原始行（文本列尚未解析）
struct RawConfiguration {
    id: String,
    part_number_id: String,
    head_count: f64,
    run_rate: f64,
    bottleneck_name: String,
    strategy: String,
    created_at: String,
}

fn map_raw_row(row: &Row<'_>) -> rusqlite::Result<RawConfiguration> {
    Ok(RawConfiguration {
        id: row.get(0)?,
        part_number_id: row.get(1)?,
        head_count: row.get(2)?,
        run_rate: row.get(3)?,
        bottleneck_name: row.get(4)?,
        strategy: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl RawConfiguration {
    fn into_domain(self) -> RepositoryResult<Configuration> {
        let strategy: OptimizationType =
            self.strategy
                .parse()
                .map_err(|message| RepositoryError::FieldValueError {
                    field: "strategy".to_string(),
                    message,
                })?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepositoryError::FieldValueError {
                field: "created_at".to_string(),
                message: e.to_string(),
            })?
            .with_timezone(&Utc);

        Ok(Configuration {
            id: self.id,
            part_number_id: self.part_number_id,
            head_count: self.head_count,
            run_rate: self.run_rate,
            bottleneck_name: self.bottleneck_name,
            strategy,
            created_at,
        })
    }
}
