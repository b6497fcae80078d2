use std::collections::BTreeSet;

use super::SeaOrmStorage;
use crate::entity::school_teachers::{
    ActiveModel as SchoolTeacherActiveModel, Column as SchoolTeacherColumn,
    Entity as SchoolTeachers,
};
use crate::entity::schools::{ActiveModel, Entity as Schools};
use crate::errors::{Result, ScheduleError};
use crate::models::schools::{entities::School, requests::CreateSchoolRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// 创建学校
    pub async fn create_school_impl(&self, req: CreateSchoolRequest) -> Result<School> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            address: Set(req.address),
            email: Set(req.email),
            logo: Set(req.logo),
            instagram: Set(req.instagram),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("创建学校失败: {e}")))?;

        Ok(result.into_school(BTreeSet::new()))
    }

    /// 通过 ID 获取学校及其教师
    pub async fn get_school_by_id_impl(&self, school_id: i64) -> Result<Option<School>> {
        let Some(school) = Schools::find_by_id(school_id)
            .one(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询学校失败: {e}")))?
        else {
            return Ok(None);
        };

        let teacher_ids = SchoolTeachers::find()
            .filter(SchoolTeacherColumn::SchoolId.eq(school_id))
            .all(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询学校教师失败: {e}")))?
            .into_iter()
            .map(|row| row.user_id)
            .collect();

        Ok(Some(school.into_school(teacher_ids)))
    }

    /// 为学校添加教师，已存在则不变
    pub async fn add_school_teacher_impl(&self, school_id: i64, user_id: i64) -> Result<()> {
        let model = SchoolTeacherActiveModel {
            school_id: Set(school_id),
            user_id: Set(user_id),
            assigned_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        SchoolTeachers::insert(model)
            .on_conflict(
                OnConflict::columns([SchoolTeacherColumn::SchoolId, SchoolTeacherColumn::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("添加学校教师失败: {e}")))?;

        Ok(())
    }
}
