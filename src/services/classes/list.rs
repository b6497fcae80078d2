use chrono::Utc;

use super::ClassSeriesService;
use crate::errors::Result;
use crate::models::classes::{entities::Class, requests::ClassListQuery};
use crate::schedule::SeriesId;

pub async fn list_upcoming_classes(
    service: &ClassSeriesService,
    school_id: i64,
) -> Result<Vec<Class>> {
    service
        .get_storage()
        .list_classes(ClassListQuery::upcoming_for_school(school_id, Utc::now()))
        .await
}

pub async fn list_series(service: &ClassSeriesService, series_id: &SeriesId) -> Result<Vec<Class>> {
    service
        .get_storage()
        .list_classes(ClassListQuery {
            series_id: Some(series_id.clone()),
            ..Default::default()
        })
        .await
}
