use tracing::info;

use super::ClassSeriesService;
use crate::errors::Result;
use crate::models::classes::requests::MutationScope;
use crate::services::cascade::{SeriesCutoff, load_target, resolve_targets};

pub async fn delete_class(
    service: &ClassSeriesService,
    class_id: i64,
    scope: MutationScope,
) -> Result<u64> {
    let storage = service.get_storage();
    let target = load_target(storage, class_id).await?;

    let ids = resolve_targets(storage, &target, scope, SeriesCutoff::WallClock).await?;
    let removed = storage.delete_classes(&ids).await?;

    info!(
        "Deleted {} classes starting from class {} ({:?})",
        removed, class_id, scope
    );

    Ok(removed)
}
