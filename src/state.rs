//! 应用状态
//!
//! 调用方持有的显式状态：当前会话、用户、学校以及学校尚未开始的课次。
//! 每次成功的写操作之后都会调用 [`AppState::refresh`]，
//! 写操作本身失败时直接返回错误，不刷新。

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, MutationScope, UpdateClassRequest},
};
use crate::models::schools::{entities::School, requests::CreateSchoolRequest};
use crate::models::users::{
    entities::{Session, User},
    requests::{ChangePasswordRequest, RegisterUserRequest},
};
use crate::services::{AccountService, ClassSeriesService, EnrollmentService};
use crate::storage::Storage;

pub struct AppState {
    storage: Arc<dyn Storage>,
    pub classes: ClassSeriesService,
    pub enrollments: EnrollmentService,
    pub accounts: AccountService,
    session: Option<Session>,
    current_user: Option<User>,
    current_school: Option<School>,
    upcoming_classes: Vec<Class>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            classes: ClassSeriesService::new(storage.clone()),
            enrollments: EnrollmentService::new(storage.clone()),
            accounts: AccountService::new(storage.clone()),
            storage,
            session: None,
            current_user: None,
            current_school: None,
            upcoming_classes: Vec::new(),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn current_school(&self) -> Option<&School> {
        self.current_school.as_ref()
    }

    pub fn upcoming_classes(&self) -> &[Class] {
        &self.upcoming_classes
    }

    /// 重新读取用户、学校与学校的后续课次
    pub async fn refresh(&mut self) -> Result<()> {
        let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
            self.clear();
            return Ok(());
        };

        self.current_user = self.storage.get_user_by_id(user_id).await?;

        let school_id = self.current_user.as_ref().and_then(|u| u.school_id);
        match school_id {
            Some(school_id) => {
                self.current_school = self.storage.get_school_by_id(school_id).await?;
                self.upcoming_classes = self.classes.list_upcoming_classes(school_id).await?;
            }
            None => {
                self.current_school = None;
                self.upcoming_classes.clear();
            }
        }

        debug!(
            "State refreshed: {} upcoming classes",
            self.upcoming_classes.len()
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.current_user = None;
        self.current_school = None;
        self.upcoming_classes.clear();
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Result<User> {
        self.accounts.register_user(request).await
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<()> {
        let session = self.accounts.sign_in(email, password).await?;
        self.session = Some(session);
        self.refresh().await
    }

    pub fn sign_out(&mut self) {
        self.session = None;
        self.clear();
    }

    pub async fn create_class(&mut self, request: CreateClassRequest) -> Result<Vec<Class>> {
        let created = self.classes.create_class(request).await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update_class(
        &mut self,
        class_id: i64,
        patch: UpdateClassRequest,
        scope: MutationScope,
    ) -> Result<Vec<Class>> {
        let updated = self.classes.update_class(class_id, patch, scope).await?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn delete_class(&mut self, class_id: i64, scope: MutationScope) -> Result<u64> {
        let removed = self.classes.delete_class(class_id, scope).await?;
        self.refresh().await?;
        Ok(removed)
    }

    pub async fn enroll(
        &mut self,
        class_id: i64,
        user_id: i64,
        scope: MutationScope,
    ) -> Result<Vec<Class>> {
        let classes = self.enrollments.enroll(class_id, user_id, scope).await?;
        self.refresh().await?;
        Ok(classes)
    }

    pub async fn unenroll(
        &mut self,
        class_id: i64,
        user_id: i64,
        scope: MutationScope,
    ) -> Result<Vec<Class>> {
        let classes = self.enrollments.unenroll(class_id, user_id, scope).await?;
        self.refresh().await?;
        Ok(classes)
    }

    pub async fn enroll_within_capacity(&mut self, class_id: i64, user_id: i64) -> Result<Class> {
        let class = self
            .enrollments
            .enroll_within_capacity(class_id, user_id)
            .await?;
        self.refresh().await?;
        Ok(class)
    }

    pub async fn create_school(&mut self, request: CreateSchoolRequest) -> Result<School> {
        let school = self
            .accounts
            .create_school(self.session.as_ref(), request)
            .await?;
        self.refresh().await?;
        Ok(school)
    }

    pub async fn assign_teacher(&mut self, school_id: i64, user_id: i64) -> Result<School> {
        let school = self
            .accounts
            .assign_teacher(self.session.as_ref(), school_id, user_id)
            .await?;
        self.refresh().await?;
        Ok(school)
    }

    pub async fn join_school(&mut self, school_id: i64) -> Result<User> {
        let user = self
            .accounts
            .join_school(self.session.as_ref(), school_id)
            .await?;
        self.refresh().await?;
        Ok(user)
    }

    pub async fn update_profile(&mut self, name: &str) -> Result<User> {
        let user = self
            .accounts
            .update_profile(self.session.as_ref(), name)
            .await?;
        self.refresh().await?;
        Ok(user)
    }

    pub async fn change_email(&mut self, current_password: &str, new_email: &str) -> Result<User> {
        let user = self
            .accounts
            .change_email(self.session.as_ref(), current_password, new_email)
            .await?;
        if let Some(session) = &mut self.session {
            session.email = user.email.clone();
        }
        self.refresh().await?;
        Ok(user)
    }

    pub async fn change_password(&mut self, request: ChangePasswordRequest) -> Result<()> {
        self.accounts
            .change_password(self.session.as_ref(), request)
            .await?;
        self.refresh().await
    }
}
