pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, MutationScope, UpdateClassRequest},
};
use crate::schedule::SeriesId;
use crate::storage::Storage;

/// 课程系列管理：创建、级联修改与删除、查询
#[derive(Clone)]
pub struct ClassSeriesService {
    storage: Arc<dyn Storage>,
}

impl ClassSeriesService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 创建课程，周期课程展开为一年的每周课次
    pub async fn create_class(&self, request: CreateClassRequest) -> Result<Vec<Class>> {
        create::create_class(self, request).await
    }

    // 修改课次，可级联到之后的同系列课次
    pub async fn update_class(
        &self,
        class_id: i64,
        patch: UpdateClassRequest,
        scope: MutationScope,
    ) -> Result<Vec<Class>> {
        update::update_class(self, class_id, patch, scope).await
    }

    // 删除课次，可级联到之后的同系列课次
    pub async fn delete_class(&self, class_id: i64, scope: MutationScope) -> Result<u64> {
        delete::delete_class(self, class_id, scope).await
    }

    // 根据 ID 获取课次
    pub async fn get_class(&self, class_id: i64) -> Result<Class> {
        get::get_class(self, class_id).await
    }

    // 学校尚未开始的课次
    pub async fn list_upcoming_classes(&self, school_id: i64) -> Result<Vec<Class>> {
        list::list_upcoming_classes(self, school_id).await
    }

    // 系列中的所有课次
    pub async fn list_series(&self, series_id: &SeriesId) -> Result<Vec<Class>> {
        list::list_series(self, series_id).await
    }
}
