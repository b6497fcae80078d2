//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_schedule_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ScheduleError {
            $($variant(String),)*
        }

        impl ScheduleError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ScheduleError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ScheduleError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ScheduleError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ScheduleError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ScheduleError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schedule_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Authentication("E006", "Authentication Error"),
    CapacityExceeded("E007", "Capacity Exceeded"),
    BatchTooLarge("E008", "Batch Too Large"),
}

impl ScheduleError {
    /// 是否为存储后端故障（连接、配置或执行失败）
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            ScheduleError::DatabaseConfig(_)
                | ScheduleError::DatabaseConnection(_)
                | ScheduleError::DatabaseOperation(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ScheduleError {}

impl From<sea_orm::DbErr> for ScheduleError {
    fn from(err: sea_orm::DbErr) -> Self {
        ScheduleError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
