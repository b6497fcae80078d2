use tracing::info;

use super::EnrollmentService;
use crate::errors::Result;
use crate::models::classes::{entities::Class, requests::MutationScope};
use crate::services::cascade::{SeriesCutoff, load_target, resolve_targets};

pub async fn unenroll(
    service: &EnrollmentService,
    class_id: i64,
    user_id: i64,
    scope: MutationScope,
) -> Result<Vec<Class>> {
    let storage = service.get_storage();
    let target = load_target(storage, class_id).await?;

    let ids = resolve_targets(storage, &target, scope, SeriesCutoff::FromOccurrence).await?;
    storage.remove_student(&ids, user_id).await?;

    info!(
        "User {} unenrolled from {} classes starting from class {}",
        user_id,
        ids.len(),
        class_id
    );

    storage.get_classes_by_ids(&ids).await
}
