//! PostgreSQL 迁移管理模块
//!
//! 按版本顺序执行建表 SQL，已执行的版本记录在迁移表中并校验内容未被修改

use std::collections::HashMap;

use bank_errors::{PersistenceError, PersistenceResult};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::map_sqlx_error;

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    /// 版本号
    pub version: i64,
    /// 名称
    pub name: String,
    /// 升级 SQL
    pub up_sql: String,
    /// 校验和
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            checksum,
        }
    }
}

/// SQL 内容的 SHA-256（64 位十六进制）
fn checksum(sql: &str) -> String {
    format!("{:x}", Sha256::digest(sql.as_bytes()))
}

/// 迁移执行结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// 本次执行的版本
    pub applied: Vec<i64>,
    /// 已执行过而跳过的版本
    pub skipped: Vec<i64>,
}

/// 迁移执行器
pub struct MigrationRunner {
    pool: PgPool,
    table_name: String,
}

impl MigrationRunner {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table_name: "_migrations".to_string(),
        }
    }

    async fn init(&self) -> PersistenceResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                checksum VARCHAR(64) NOT NULL
            )",
            self.table_name
        );
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create migration table", e))?;
        Ok(())
    }

    async fn applied_checksums(&self) -> PersistenceResult<HashMap<i64, String>> {
        let sql = format!("SELECT version, checksum FROM {}", self.table_name);
        let rows: Vec<(i64, String)> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to load applied migrations", e))?;
        Ok(rows.into_iter().collect())
    }

    async fn apply(&self, migration: &Migration) -> PersistenceResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin migration", e))?;

        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_sqlx_error(&format!("Failed to apply migration {}", migration.version), e)
            })?;

        let insert_sql = format!(
            "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3)",
            self.table_name
        );
        sqlx::query(&insert_sql)
            .bind(migration.version)
            .bind(&migration.name)
            .bind(&migration.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to record migration", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit migration", e))?;

        info!(
            version = migration.version,
            name = %migration.name,
            "Migration applied"
        );
        Ok(())
    }

    /// 按版本升序执行未执行的迁移，遇到错误立即停止
    ///
    /// 已执行版本的 SQL 被修改时返回错误，不做任何变更。
    pub async fn run(&self, migrations: &[Migration]) -> PersistenceResult<MigrationReport> {
        self.init().await?;
        let applied = self.applied_checksums().await?;

        let mut sorted: Vec<&Migration> = migrations.iter().collect();
        sorted.sort_by_key(|m| m.version);

        for migration in &sorted {
            if let Some(recorded) = applied.get(&migration.version) {
                if *recorded != migration.checksum {
                    return Err(PersistenceError::internal(format!(
                        "Migration {} ({}) was modified after being applied",
                        migration.version, migration.name
                    )));
                }
            }
        }

        let mut report = MigrationReport::default();
        for migration in sorted {
            if applied.contains_key(&migration.version) {
                debug!(version = migration.version, "Migration already applied, skipping");
                report.skipped.push(migration.version);
                continue;
            }
            self.apply(migration).await?;
            report.applied.push(migration.version);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let sql = "CREATE TABLE accounts (id BIGSERIAL PRIMARY KEY)";
        let m1 = Migration::new(1, "create_accounts", sql);
        let m2 = Migration::new(1, "create_accounts", sql);
        assert_eq!(m1.checksum, m2.checksum);
        assert_eq!(m1.checksum.len(), 64);
    }

    #[test]
    fn test_checksum_detects_changes() {
        let m1 = Migration::new(1, "create_accounts", "CREATE TABLE a (id INT)");
        let m2 = Migration::new(1, "create_accounts", "CREATE TABLE a (id BIGINT)");
        assert_ne!(m1.checksum, m2.checksum);
    }

    #[test]
    fn test_known_sha256_vector() {
        assert_eq!(
            checksum("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            checksum(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
