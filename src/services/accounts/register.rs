use tracing::{info, warn};

use super::AccountService;
use crate::errors::{Result, ScheduleError};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, RegisterUserRequest},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_display_name, validate_email, validate_password_simple};

pub async fn register_user(service: &AccountService, request: RegisterUserRequest) -> Result<User> {
    let storage = service.get_storage();
    let email = request.email.trim().to_string();

    validate_email(&email).map_err(ScheduleError::validation)?;
    validate_display_name(&request.name).map_err(ScheduleError::validation)?;
    validate_password_simple(&request.password).map_err(ScheduleError::validation)?;

    // 邮箱唯一
    if storage.get_user_by_email(&email).await?.is_some() {
        warn!("Registration rejected, email {} already in use", email);
        return Err(ScheduleError::validation("Email is already registered"));
    }

    let password_hash = hash_password(&request.password)?;

    let user = storage
        .create_user(CreateUserRequest {
            email,
            name: request.name.trim().to_string(),
            password_hash,
            role: request.role,
            school_id: None,
        })
        .await?;

    info!("User {} registered as {}", user.id, user.role);
    Ok(user)
}
