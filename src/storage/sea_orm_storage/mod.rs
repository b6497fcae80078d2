//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod enrollments;
mod schools;
mod users;

use crate::config::{AppConfig, BatchConfig, DatabaseConfig};
use crate::errors::{Result, ScheduleError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    pub(crate) batch: BatchConfig,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if config.batch.chunk_size == 0 {
            return Err(ScheduleError::database_config(
                "database.batch.chunk_size must be greater than zero",
            ));
        }

        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self {
            db,
            batch: config.batch,
        })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存数据库不支持 WAL
        let journal_mode = if url.contains(":memory:") {
            SqliteJournalMode::Memory
        } else {
            SqliteJournalMode::Wal
        };

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ScheduleError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(journal_mode)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| ScheduleError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ScheduleError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ScheduleError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, :memory: 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 原子写入前检查记录数，超出上限直接拒绝
    pub(crate) fn ensure_within_batch_limit(&self, records: usize, operation: &str) -> Result<()> {
        if records > self.batch.max_records {
            return Err(ScheduleError::batch_too_large(format!(
                "{operation}: {records} records exceed the limit of {}",
                self.batch.max_records
            )));
        }
        Ok(())
    }
}

// Storage trait 实现
use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, NewClass, UpdateClassRequest},
    },
    schools::{entities::School, requests::CreateSchoolRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课次模块
    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn create_classes(&self, classes: Vec<NewClass>) -> Result<Vec<Class>> {
        self.create_classes_impl(classes).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_classes_by_ids(&self, class_ids: &[i64]) -> Result<Vec<Class>> {
        self.get_classes_by_ids_impl(class_ids).await
    }

    async fn list_classes(&self, query: ClassListQuery) -> Result<Vec<Class>> {
        self.list_classes_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: &UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn update_classes(&self, class_ids: &[i64], update: &UpdateClassRequest) -> Result<u64> {
        self.update_classes_impl(class_ids, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn delete_classes(&self, class_ids: &[i64]) -> Result<u64> {
        self.delete_classes_impl(class_ids).await
    }

    // 报名模块
    async fn add_student(&self, class_ids: &[i64], user_id: i64) -> Result<()> {
        self.add_student_impl(class_ids, user_id).await
    }

    async fn remove_student(&self, class_ids: &[i64], user_id: i64) -> Result<()> {
        self.remove_student_impl(class_ids, user_id).await
    }

    async fn add_student_within_capacity(&self, class_id: i64, user_id: i64) -> Result<Class> {
        self.add_student_within_capacity_impl(class_id, user_id)
            .await
    }

    // 学校模块
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(school).await
    }

    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(school_id).await
    }

    async fn add_school_teacher(&self, school_id: i64, user_id: i64) -> Result<()> {
        self.add_school_teacher_impl(school_id, user_id).await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }
}
