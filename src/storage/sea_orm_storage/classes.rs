//! 课次存储操作

use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::entity::class_enrollments::{Column as EnrollmentColumn, Entity as ClassEnrollments};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model};
use crate::errors::{Result, ScheduleError};
use crate::models::classes::{
    entities::Class,
    requests::{ClassListQuery, NewClass, UpdateClassRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    fn new_class_model(class: NewClass, now: i64) -> ActiveModel {
        ActiveModel {
            series_id: Set(class.series_id.map(|id| id.into_inner())),
            school_id: Set(class.school_id),
            teacher_id: Set(class.teacher_id),
            title: Set(class.title),
            level: Set(class.level.to_string()),
            description: Set(class.description),
            starts_at: Set(class.starts_at.timestamp()),
            duration_minutes: Set(class.duration_minutes),
            max_students: Set(class.max_students),
            is_recurring: Set(class.is_recurring),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    /// 只包含更新请求中给出的列
    fn patch_model(update: &UpdateClassRequest, now: i64) -> ActiveModel {
        let mut model = ActiveModel {
            id: NotSet,
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(title) = &update.title {
            model.title = Set(title.clone());
        }
        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }
        if let Some(description) = &update.description {
            model.description = Set(description.clone());
        }
        if let Some(starts_at) = update.starts_at {
            model.starts_at = Set(starts_at.timestamp());
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(max_students);
        }

        model
    }

    /// 读取一组课次的报名名单
    pub(crate) async fn load_enrollments<C: ConnectionTrait>(
        &self,
        conn: &C,
        class_ids: &[i64],
    ) -> Result<HashMap<i64, BTreeSet<i64>>> {
        let mut enrollments: HashMap<i64, BTreeSet<i64>> = HashMap::new();

        for chunk in class_ids.chunks(self.batch.chunk_size) {
            let rows = ClassEnrollments::find()
                .filter(EnrollmentColumn::ClassId.is_in(chunk.iter().copied()))
                .all(conn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("查询报名名单失败: {e}")))?;

            for row in rows {
                enrollments
                    .entry(row.class_id)
                    .or_default()
                    .insert(row.user_id);
            }
        }

        Ok(enrollments)
    }

    /// 把数据库模型连同报名名单转换为业务模型
    pub(crate) async fn hydrate_classes<C: ConnectionTrait>(
        &self,
        conn: &C,
        models: Vec<Model>,
    ) -> Result<Vec<Class>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut enrollments = self.load_enrollments(conn, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let students = enrollments.remove(&m.id).unwrap_or_default();
                m.into_class(students)
            })
            .collect())
    }

    /// 创建单个课次
    pub async fn create_class_impl(&self, class: NewClass) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let result = Self::new_class_model(class, now)
            .insert(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("创建课次失败: {e}")))?;

        Ok(result.into_class(BTreeSet::new()))
    }

    /// 在同一事务中创建一组课次
    pub async fn create_classes_impl(&self, classes: Vec<NewClass>) -> Result<Vec<Class>> {
        if classes.is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_within_batch_limit(classes.len(), "create classes")?;

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(classes.len());
        for class in classes {
            // 出错时事务随 txn 一起丢弃并回滚
            let model = Self::new_class_model(class, now)
                .insert(&txn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("批量创建课次失败: {e}")))?;
            created.push(model.into_class(BTreeSet::new()));
        }

        txn.commit()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    /// 通过 ID 获取课次
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询课次失败: {e}")))?;

        match result {
            Some(model) => Ok(self.hydrate_classes(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 通过 ID 批量获取课次
    pub async fn get_classes_by_ids_impl(&self, class_ids: &[i64]) -> Result<Vec<Class>> {
        let mut models = Vec::with_capacity(class_ids.len());

        for chunk in class_ids.chunks(self.batch.chunk_size) {
            let rows = Classes::find()
                .filter(Column::Id.is_in(chunk.iter().copied()))
                .all(&self.db)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("查询课次失败: {e}")))?;
            models.extend(rows);
        }

        models.sort_by_key(|m| (m.starts_at, m.id));
        self.hydrate_classes(&self.db, models).await
    }

    /// 按条件列出课次
    pub async fn list_classes_impl(&self, query: ClassListQuery) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        // 等值条件
        if let Some(school_id) = query.school_id {
            select = select.filter(Column::SchoolId.eq(school_id));
        }
        if let Some(series_id) = &query.series_id {
            select = select.filter(Column::SeriesId.eq(series_id.as_str()));
        }

        // 时间范围
        if let Some(from) = query.starts_from {
            select = select.filter(Column::StartsAt.gte(from.timestamp()));
        }
        if let Some(before) = query.starts_before {
            select = select.filter(Column::StartsAt.lt(before.timestamp()));
        }

        let models = select
            .order_by_asc(Column::StartsAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询课次列表失败: {e}")))?;

        self.hydrate_classes(&self.db, models).await
    }

    /// 更新单个课次
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: &UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let now = chrono::Utc::now().timestamp();

        let result = Classes::update_many()
            .set(Self::patch_model(update, now))
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("更新课次失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_class_by_id_impl(class_id).await
    }

    /// 在同一事务中更新一组课次
    pub async fn update_classes_impl(
        &self,
        class_ids: &[i64],
        update: &UpdateClassRequest,
    ) -> Result<u64> {
        if class_ids.is_empty() {
            return Ok(0);
        }
        self.ensure_within_batch_limit(class_ids.len(), "update classes")?;

        let now = chrono::Utc::now().timestamp();
        let patch = Self::patch_model(update, now);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("开启事务失败: {e}")))?;

        let mut affected = 0;
        for chunk in class_ids.chunks(self.batch.chunk_size) {
            let result = Classes::update_many()
                .set(patch.clone())
                .filter(Column::Id.is_in(chunk.iter().copied()))
                .exec(&txn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("批量更新课次失败: {e}")))?;
            affected += result.rows_affected;
        }

        txn.commit()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(affected)
    }

    /// 删除单个课次及其报名记录
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let affected = self.delete_classes_impl(&[class_id]).await?;
        Ok(affected > 0)
    }

    /// 在同一事务中删除一组课次及其报名记录
    pub async fn delete_classes_impl(&self, class_ids: &[i64]) -> Result<u64> {
        if class_ids.is_empty() {
            return Ok(0);
        }
        self.ensure_within_batch_limit(class_ids.len(), "delete classes")?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("开启事务失败: {e}")))?;

        let mut affected = 0;
        for chunk in class_ids.chunks(self.batch.chunk_size) {
            ClassEnrollments::delete_many()
                .filter(EnrollmentColumn::ClassId.is_in(chunk.iter().copied()))
                .exec(&txn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("删除报名记录失败: {e}")))?;

            let result = Classes::delete_many()
                .filter(Column::Id.is_in(chunk.iter().copied()))
                .exec(&txn)
                .await
                .map_err(|e| ScheduleError::database_operation(format!("删除课次失败: {e}")))?;
            affected += result.rows_affected;
        }

        txn.commit()
            .await
            .map_err(|e| ScheduleError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(affected)
    }
}
