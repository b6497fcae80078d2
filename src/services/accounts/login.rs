use tracing::{info, warn};

use super::AccountService;
use crate::errors::{Result, ScheduleError};
use crate::models::users::entities::Session;
use crate::utils::password::verify_password;

pub async fn sign_in(service: &AccountService, email: &str, password: &str) -> Result<Session> {
    // 1. 根据邮箱获取用户
    let user = service.get_storage().get_user_by_email(email.trim()).await?;

    // 2. 验证密码
    match user {
        Some(user) if verify_password(password, &user.password_hash) => {
            info!("User {} signed in", user.id);
            Ok(Session::from(&user))
        }
        _ => {
            warn!("Failed sign-in attempt for {}", email);
            Err(ScheduleError::authentication("Email or password is incorrect"))
        }
    }
}
