use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub argon2: Argon2Config,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
    /// 维护程序启动时汇报即将开课数量的学校（可选）
    pub school_id: Option<i64>,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
    pub batch: BatchConfig,
}

/// 批量写入配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatchConfig {
    /// 单次原子写入允许的最大记录数，超过则直接拒绝
    pub max_records: usize,
    /// 单条 SQL 语句携带的 ID 数量
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_records: 500,
            chunk_size: 100,
        }
    }
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}
