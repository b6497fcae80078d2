use tracing::{info, warn};

use super::ClassSeriesService;
use crate::errors::Result;
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::schedule::{assign_series_ids, weekly_occurrences};

pub async fn create_class(
    service: &ClassSeriesService,
    request: CreateClassRequest,
) -> Result<Vec<Class>> {
    if let Err(e) = request.validate() {
        warn!("Rejected class creation: {}", e);
        return Err(e);
    }

    let storage = service.get_storage();
    let start = request.stored_start();

    if !request.is_recurring {
        let class = storage.create_class(request.occurrence_at(start)).await?;
        info!("Class {} created at {}", class.id, class.starts_at);
        return Ok(vec![class]);
    }

    let occurrences = weekly_occurrences(start)
        .into_iter()
        .map(|starts_at| request.occurrence_at(starts_at))
        .collect();

    let created = storage.create_classes(assign_series_ids(occurrences)).await?;

    info!(
        "Recurring class '{}' created with {} occurrences (series {})",
        request.title,
        created.len(),
        created
            .get(1)
            .and_then(|class| class.series_id.as_ref())
            .map(|id| id.as_str())
            .unwrap_or("-")
    );

    Ok(created)
}
