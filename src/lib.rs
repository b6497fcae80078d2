//! Studio Schedule - 课程排期与报名核心库
//!
//! 管理周期课程的每周课次、系列级联修改以及学员报名。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 日志与启动流程
//! - `schedule`: 课次生成与系列标识
//! - `services`: 业务逻辑层
//! - `state`: 调用方持有的应用状态
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod schedule;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
