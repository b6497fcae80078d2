use super::ClassSeriesService;
use crate::errors::Result;
use crate::models::classes::entities::Class;
use crate::services::cascade::load_target;

pub async fn get_class(service: &ClassSeriesService, class_id: i64) -> Result<Class> {
    load_target(service.get_storage(), class_id).await
}
