use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, NewClass, UpdateClassRequest},
    },
    schools::{entities::School, requests::CreateSchoolRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储门面
///
/// 多记录写入（`create_classes`、`update_classes`、`delete_classes`、
/// `add_student`、`remove_student`）均为原子操作：要么全部生效，要么全部不生效。
/// 超过批量上限时直接返回 `BatchTooLarge`，不会触碰存储。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课次管理方法
    // 创建单个课次
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    // 原子地创建一组课次，按输入顺序返回
    async fn create_classes(&self, classes: Vec<NewClass>) -> Result<Vec<Class>>;
    // 通过ID获取课次
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过ID批量获取课次，按开课时间排序
    async fn get_classes_by_ids(&self, class_ids: &[i64]) -> Result<Vec<Class>>;
    // 按学校、系列、开课时间范围查询，按开课时间排序
    async fn list_classes(&self, query: ClassListQuery) -> Result<Vec<Class>>;
    // 更新单个课次
    async fn update_class(
        &self,
        class_id: i64,
        update: &UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 原子地更新一组课次，返回受影响行数
    async fn update_classes(&self, class_ids: &[i64], update: &UpdateClassRequest) -> Result<u64>;
    // 删除单个课次
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 原子地删除一组课次，返回受影响行数
    async fn delete_classes(&self, class_ids: &[i64]) -> Result<u64>;

    /// 报名管理方法
    // 集合并入：把学员加入每个课次的报名名单，已在名单中则不变
    async fn add_student(&self, class_ids: &[i64], user_id: i64) -> Result<()>;
    // 集合移除：把学员移出每个课次的报名名单，不在名单中则不变
    async fn remove_student(&self, class_ids: &[i64], user_id: i64) -> Result<()>;
    // 在同一事务内检查名额后报名
    async fn add_student_within_capacity(&self, class_id: i64, user_id: i64) -> Result<Class>;

    /// 学校管理方法
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>>;
    // 集合并入：为学校添加教师
    async fn add_school_teacher(&self, school_id: i64, user_id: i64) -> Result<()>;

    /// 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
