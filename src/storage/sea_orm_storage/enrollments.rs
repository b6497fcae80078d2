//! 报名名单存储操作
//!
//! 名单为 `(class_id, user_id)` 的集合：并入依赖唯一索引与 `ON CONFLICT DO NOTHING`，
//! 并发报名同一课次时不会丢失或重复。

use super::SeaOrmStorage;
use crate::entity::class_enrollments::{ActiveModel, Column, Entity as ClassEnrollments};
use crate::entity::classes::Entity as Classes;
use crate::errors::{Result, ScheduleError};
use crate::models::classes::entities::Class;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait, sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// 把学员并入每个课次的报名名单
    pub async fn add_student_impl(&self, class_ids: &[i64], user_id: i64) -> Result<()> {
        if class_ids.is_empty() {
            return Ok(());
        }
        self.ensure_within_batch_limit(class_ids.len(), "add student")?;

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("开启事务失败: {e}")))?;

        for chunk in class_ids.chunks(self.batch.chunk_size) {
            let models = chunk.iter().map(|&class_id| ActiveModel {
                class_id: Set(class_id),
                user_id: Set(user_id),
                enrolled_at: Set(now),
                ..Default::default()
            });

            ClassEnrollments::insert_many(models)
                .on_conflict(
                    OnConflict::columns([Column::ClassId, Column::UserId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("报名失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 把学员移出每个课次的报名名单
    pub async fn remove_student_impl(&self, class_ids: &[i64], user_id: i64) -> Result<()> {
        if class_ids.is_empty() {
            return Ok(());
        }
        self.ensure_within_batch_limit(class_ids.len(), "remove student")?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("开启事务失败: {e}")))?;

        for chunk in class_ids.chunks(self.batch.chunk_size) {
            ClassEnrollments::delete_many()
                .filter(Column::ClassId.is_in(chunk.iter().copied()))
                .filter(Column::UserId.eq(user_id))
                .exec(&txn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("取消报名失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 在同一事务中检查名额并报名
    ///
    /// 已在名单中时直接返回课次；名单已满返回 `CapacityExceeded`。
    pub async fn add_student_within_capacity_impl(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Class> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("开启事务失败: {e}")))?;

        let model = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询课次失败: {e}")))?
            .ok_or_else(|| ScheduleError::not_found(format!("Class {class_id} not found")))?;

        let mut roster = self
            .load_enrollments(&txn, &[class_id])
            .await?
            .remove(&class_id)
            .unwrap_or_default();

        if roster.contains(&user_id) {
            return Ok(model.into_class(roster));
        }

        if roster.len() >= usize::try_from(model.max_students).unwrap_or(0) {
            return Err(ScheduleError::capacity_exceeded(format!(
                "Class {class_id} is full ({} of {} seats taken)",
                roster.len(),
                model.max_students
            )));
        }

        let enrollment = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        ClassEnrollments::insert(enrollment)
            .on_conflict(
                OnConflict::columns([Column::ClassId, Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("报名失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("提交事务失败: {e}")))?;

        roster.insert(user_id);
        Ok(model.into_class(roster))
    }
}
