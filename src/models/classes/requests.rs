use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

use super::entities::ClassLevel;
use crate::errors::{Result, ScheduleError};
use crate::schedule::SeriesId;

// 级联范围：仅当前课次，或当前及之后的同系列课次
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationScope {
    #[default]
    ThisOccurrence,
    ThisAndFollowing,
}

impl MutationScope {
    pub fn from_apply_to_series(apply_to_series: bool) -> Self {
        if apply_to_series {
            MutationScope::ThisAndFollowing
        } else {
            MutationScope::ThisOccurrence
        }
    }

    pub fn applies_to_series(self) -> bool {
        self == MutationScope::ThisAndFollowing
    }
}

// 创建课程请求
//
// `is_recurring` 为真时，从 `starts_at` 起按周展开一年的课次。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub school_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub level: ClassLevel,
    pub description: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub max_students: i32,
    #[serde(default)]
    pub is_recurring: bool,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ScheduleError::validation("Class title must not be empty"));
        }
        if self.max_students <= 0 {
            return Err(ScheduleError::validation(
                "max_students must be a positive integer",
            ));
        }
        if self.duration_minutes <= 0 {
            return Err(ScheduleError::validation(
                "duration_minutes must be a positive integer",
            ));
        }
        Ok(())
    }

    /// 存储精度为整秒，带毫秒的开课时间向后取整，保证第一节不早于请求时间
    pub fn stored_start(&self) -> DateTime<Utc> {
        let truncated = self.starts_at.trunc_subsecs(0);
        if truncated < self.starts_at {
            truncated + Duration::seconds(1)
        } else {
            truncated
        }
    }

    /// 以指定开课时间生成一条待写入的课次
    pub fn occurrence_at(&self, starts_at: chrono::DateTime<chrono::Utc>) -> NewClass {
        NewClass {
            series_id: None,
            school_id: self.school_id,
            teacher_id: self.teacher_id,
            title: self.title.clone(),
            level: self.level,
            description: self.description.clone(),
            starts_at,
            duration_minutes: self.duration_minutes,
            max_students: self.max_students,
            is_recurring: self.is_recurring,
        }
    }
}

// 待写入存储的单个课次（用于存储层）
#[derive(Debug, Clone)]
pub struct NewClass {
    pub series_id: Option<SeriesId>,
    pub school_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub level: ClassLevel,
    pub description: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub max_students: i32,
    pub is_recurring: bool,
}

// 区分字段缺失（外层 None）与显式 null（Some(None)）
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// 更新课程请求，只写入给出的字段
//
// `description: Some(None)` 清空描述。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub teacher_id: Option<i64>,
    pub title: Option<String>,
    pub level: Option<ClassLevel>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_minutes: Option<i32>,
    pub max_students: Option<i32>,
}

impl UpdateClassRequest {
    pub fn is_empty(&self) -> bool {
        self.teacher_id.is_none()
            && self.title.is_none()
            && self.level.is_none()
            && self.description.is_none()
            && self.starts_at.is_none()
            && self.duration_minutes.is_none()
            && self.max_students.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ScheduleError::validation("Update request has no fields"));
        }
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err(ScheduleError::validation("Class title must not be empty"));
        }
        if matches!(self.max_students, Some(n) if n <= 0) {
            return Err(ScheduleError::validation(
                "max_students must be a positive integer",
            ));
        }
        if matches!(self.duration_minutes, Some(n) if n <= 0) {
            return Err(ScheduleError::validation(
                "duration_minutes must be a positive integer",
            ));
        }
        Ok(())
    }
}

// 课程列表查询参数（用于存储层）
//
// 等值条件：学校、系列；范围条件：开课时间 `[starts_from, starts_before)`。
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub school_id: Option<i64>,
    pub series_id: Option<SeriesId>,
    pub starts_from: Option<chrono::DateTime<chrono::Utc>>,
    pub starts_before: Option<chrono::DateTime<chrono::Utc>>,
}

impl ClassListQuery {
    /// 某学校从指定时间起的课次
    pub fn upcoming_for_school(school_id: i64, from: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            school_id: Some(school_id),
            starts_from: Some(from),
            ..Default::default()
        }
    }

    /// 某系列从指定时间起的课次
    pub fn series_from(series_id: SeriesId, from: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            series_id: Some(series_id),
            starts_from: Some(from),
            ..Default::default()
        }
    }
}
