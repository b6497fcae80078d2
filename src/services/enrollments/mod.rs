pub mod capacity;
pub mod enroll;
pub mod unenroll;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::classes::{entities::Class, requests::MutationScope};
use crate::storage::Storage;

/// 报名管理：加入或移出课次名单，可级联到同系列之后的课次
#[derive(Clone)]
pub struct EnrollmentService {
    storage: Arc<dyn Storage>,
}

impl EnrollmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 报名，不检查名额
    pub async fn enroll(
        &self,
        class_id: i64,
        user_id: i64,
        scope: MutationScope,
    ) -> Result<Vec<Class>> {
        enroll::enroll(self, class_id, user_id, scope).await
    }

    // 取消报名
    pub async fn unenroll(
        &self,
        class_id: i64,
        user_id: i64,
        scope: MutationScope,
    ) -> Result<Vec<Class>> {
        unenroll::unenroll(self, class_id, user_id, scope).await
    }

    // 检查名额后报名单个课次
    pub async fn enroll_within_capacity(&self, class_id: i64, user_id: i64) -> Result<Class> {
        capacity::enroll_within_capacity(self, class_id, user_id).await
    }
}
