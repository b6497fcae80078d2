use tracing::{info, warn};

use super::AccountService;
use crate::errors::{Result, ScheduleError};
use crate::models::users::{
    entities::{Session, User},
    requests::{ChangePasswordRequest, UpdateUserRequest},
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_email, validate_password_simple};

/// 核对当前密码
fn reauthenticate(user: &User, current_password: &str) -> Result<()> {
    if verify_password(current_password, &user.password_hash) {
        Ok(())
    } else {
        warn!("User {} failed password re-verification", user.id);
        Err(ScheduleError::authentication("Current password is incorrect"))
    }
}

pub async fn change_email(
    service: &AccountService,
    session: Option<&Session>,
    current_password: &str,
    new_email: &str,
) -> Result<User> {
    let user = service.session_user(session).await?;
    reauthenticate(&user, current_password)?;

    let new_email = new_email.trim();
    validate_email(new_email).map_err(ScheduleError::validation)?;

    let storage = service.get_storage();
    if let Some(existing) = storage.get_user_by_email(new_email).await?
        && existing.id != user.id
    {
        return Err(ScheduleError::validation("Email is already registered"));
    }

    let updated = storage
        .update_user(
            user.id,
            UpdateUserRequest {
                email: Some(new_email.to_string()),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("User {} not found", user.id)))?;

    info!("User {} changed email", user.id);
    Ok(updated)
}

pub async fn change_password(
    service: &AccountService,
    session: Option<&Session>,
    request: ChangePasswordRequest,
) -> Result<()> {
    let user = service.session_user(session).await?;

    if request.new_password != request.confirm_password {
        return Err(ScheduleError::validation(
            "New password and confirmation do not match",
        ));
    }
    validate_password_simple(&request.new_password).map_err(ScheduleError::validation)?;
    reauthenticate(&user, &request.current_password)?;

    let password_hash = hash_password(&request.new_password)?;
    service
        .get_storage()
        .update_user(
            user.id,
            UpdateUserRequest {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("User {} not found", user.id)))?;

    info!("User {} changed password", user.id);
    Ok(())
}
