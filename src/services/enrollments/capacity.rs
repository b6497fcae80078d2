use tracing::{info, warn};

use super::EnrollmentService;
use crate::errors::{Result, ScheduleError};
use crate::models::classes::entities::Class;

pub async fn enroll_within_capacity(
    service: &EnrollmentService,
    class_id: i64,
    user_id: i64,
) -> Result<Class> {
    match service
        .get_storage()
        .add_student_within_capacity(class_id, user_id)
        .await
    {
        Ok(class) => {
            info!(
                "User {} holds a seat in class {} ({} of {})",
                user_id,
                class_id,
                class.enrolled_students.len(),
                class.max_students
            );
            Ok(class)
        }
        Err(e @ ScheduleError::CapacityExceeded(_)) => {
            warn!("User {} turned away: {}", user_id, e);
            Err(e)
        }
        Err(e) => Err(e),
    }
}
