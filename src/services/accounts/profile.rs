use tracing::info;

use super::AccountService;
use crate::errors::{Result, ScheduleError};
use crate::models::users::{
    entities::{Session, User},
    requests::UpdateUserRequest,
};
use crate::utils::validate::validate_display_name;

pub async fn update_profile(
    service: &AccountService,
    session: Option<&Session>,
    name: &str,
) -> Result<User> {
    let user = service.session_user(session).await?;
    validate_display_name(name).map_err(ScheduleError::validation)?;

    let updated = service
        .get_storage()
        .update_user(
            user.id,
            UpdateUserRequest {
                name: Some(name.trim().to_string()),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("User {} not found", user.id)))?;

    info!("User {} updated profile", user.id);
    Ok(updated)
}
