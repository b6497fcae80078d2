use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, ScheduleError};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            name: Set(req.name),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            school_id: Set(req.school_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }

        if let Some(school_id) = update.school_id {
            model.school_id = Set(Some(school_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ScheduleError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }
}
