use tracing::{info, warn};

use super::ClassSeriesService;
use crate::errors::{Result, ScheduleError};
use crate::models::classes::{
    entities::Class,
    requests::{MutationScope, UpdateClassRequest},
};
use crate::services::cascade::{SeriesCutoff, load_target, resolve_targets};

pub async fn update_class(
    service: &ClassSeriesService,
    class_id: i64,
    patch: UpdateClassRequest,
    scope: MutationScope,
) -> Result<Vec<Class>> {
    if let Err(e) = patch.validate() {
        warn!("Rejected update of class {}: {}", class_id, e);
        return Err(e);
    }

    let storage = service.get_storage();
    let target = load_target(storage, class_id).await?;

    if !scope.applies_to_series() || target.series_id.is_none() {
        let updated = storage
            .update_class(target.id, &patch)
            .await?
            .ok_or_else(|| ScheduleError::not_found(format!("Class {class_id} not found")))?;
        info!("Class {} updated", class_id);
        return Ok(vec![updated]);
    }

    let ids = resolve_targets(storage, &target, scope, SeriesCutoff::WallClock).await?;
    let affected = storage.update_classes(&ids, &patch).await?;

    info!(
        "Series update from class {} affected {} occurrences",
        class_id, affected
    );

    storage.get_classes_by_ids(&ids).await
}
