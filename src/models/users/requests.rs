use super::entities::UserRole;
use serde::Deserialize;

// 用户注册请求（密码为明文，由服务层哈希）
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}

// 用户创建请求（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub school_id: Option<i64>,
}

// 用户更新请求
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub school_id: Option<i64>,
}

// 修改密码请求
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}
