use tracing::{info, warn};

use super::AccountService;
use crate::errors::{Result, ScheduleError};
use crate::models::schools::{entities::School, requests::CreateSchoolRequest};
use crate::models::users::{
    entities::{Session, User, UserRole},
    requests::UpdateUserRequest,
};

pub async fn get_school(service: &AccountService, school_id: i64) -> Result<School> {
    service
        .get_storage()
        .get_school_by_id(school_id)
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("School {school_id} not found")))
}

/// 把用户挂到学校下
async fn attach_user(service: &AccountService, user_id: i64, school_id: i64) -> Result<User> {
    service
        .get_storage()
        .update_user(
            user_id,
            UpdateUserRequest {
                school_id: Some(school_id),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("User {user_id} not found")))
}

pub async fn create_school(
    service: &AccountService,
    session: Option<&Session>,
    request: CreateSchoolRequest,
) -> Result<School> {
    let user = service.session_user(session).await?;

    if user.role != UserRole::Teacher {
        warn!("User {} is not a teacher and cannot create a school", user.id);
        return Err(ScheduleError::validation("Only teachers can create a school"));
    }
    request.validate()?;

    let storage = service.get_storage();
    let school = storage.create_school(request).await?;
    storage.add_school_teacher(school.id, user.id).await?;
    attach_user(service, user.id, school.id).await?;

    info!("School {} created by teacher {}", school.id, user.id);
    get_school(service, school.id).await
}

pub async fn assign_teacher(
    service: &AccountService,
    session: Option<&Session>,
    school_id: i64,
    user_id: i64,
) -> Result<School> {
    let caller = service.session_user(session).await?;
    let school = get_school(service, school_id).await?;

    // 只有本校教师可以添加教师
    if !school.teacher_ids.contains(&caller.id) {
        warn!(
            "User {} is not a teacher of school {} and cannot assign teachers",
            caller.id, school_id
        );
        return Err(ScheduleError::authentication(format!(
            "Only teachers of school {school_id} can assign teachers"
        )));
    }

    let storage = service.get_storage();
    let teacher = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("User {user_id} not found")))?;

    if teacher.role != UserRole::Teacher {
        return Err(ScheduleError::validation(format!(
            "User {user_id} is not a teacher"
        )));
    }

    storage.add_school_teacher(school_id, user_id).await?;
    attach_user(service, user_id, school_id).await?;

    info!("Teacher {} assigned to school {}", user_id, school_id);
    get_school(service, school_id).await
}

pub async fn join_school(
    service: &AccountService,
    session: Option<&Session>,
    school_id: i64,
) -> Result<User> {
    let user = service.session_user(session).await?;
    get_school(service, school_id).await?;

    let updated = attach_user(service, user.id, school_id).await?;
    info!("User {} joined school {}", user.id, school_id);
    Ok(updated)
}
