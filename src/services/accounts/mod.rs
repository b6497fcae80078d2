pub mod credentials;
pub mod login;
pub mod profile;
pub mod register;
pub mod school;

use std::sync::Arc;

use crate::errors::{Result, ScheduleError};
use crate::models::schools::{entities::School, requests::CreateSchoolRequest};
use crate::models::users::{
    entities::{Session, User},
    requests::{ChangePasswordRequest, RegisterUserRequest},
};
use crate::storage::Storage;

/// 账号、登录与学校归属
#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn Storage>,
}

impl AccountService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// 读取会话对应的用户，未登录或用户已不存在时返回 `Authentication`
    pub(crate) async fn session_user(&self, session: Option<&Session>) -> Result<User> {
        let session =
            session.ok_or_else(|| ScheduleError::authentication("Not signed in"))?;

        self.storage
            .get_user_by_id(session.user_id)
            .await?
            .ok_or_else(|| ScheduleError::authentication("Session user no longer exists"))
    }

    // 注册
    pub async fn register_user(&self, request: RegisterUserRequest) -> Result<User> {
        register::register_user(self, request).await
    }

    // 登录
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        login::sign_in(self, email, password).await
    }

    // 教师创建学校
    pub async fn create_school(
        &self,
        session: Option<&Session>,
        request: CreateSchoolRequest,
    ) -> Result<School> {
        school::create_school(self, session, request).await
    }

    // 为学校添加教师
    pub async fn assign_teacher(
        &self,
        session: Option<&Session>,
        school_id: i64,
        user_id: i64,
    ) -> Result<School> {
        school::assign_teacher(self, session, school_id, user_id).await
    }

    // 学员加入学校
    pub async fn join_school(&self, session: Option<&Session>, school_id: i64) -> Result<User> {
        school::join_school(self, session, school_id).await
    }

    pub async fn get_school(&self, school_id: i64) -> Result<School> {
        school::get_school(self, school_id).await
    }

    // 修改显示名称
    pub async fn update_profile(&self, session: Option<&Session>, name: &str) -> Result<User> {
        profile::update_profile(self, session, name).await
    }

    // 修改邮箱，需要当前密码
    pub async fn change_email(
        &self,
        session: Option<&Session>,
        current_password: &str,
        new_email: &str,
    ) -> Result<User> {
        credentials::change_email(self, session, current_password, new_email).await
    }

    // 修改密码，需要当前密码
    pub async fn change_password(
        &self,
        session: Option<&Session>,
        request: ChangePasswordRequest,
    ) -> Result<()> {
        credentials::change_password(self, session, request).await
    }
}
