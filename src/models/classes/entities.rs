use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schedule::SeriesId;

// 课程难度
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassLevel {
    Beginner,     // 初级
    Intermediate, // 中级
    Advanced,     // 高级
}

impl ClassLevel {
    pub const BEGINNER: &'static str = "beginner";
    pub const INTERMEDIATE: &'static str = "intermediate";
    pub const ADVANCED: &'static str = "advanced";
}

impl<'de> Deserialize<'de> for ClassLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ClassLevel>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程难度: '{s}'. 支持的难度: beginner, intermediate, advanced"
            ))
        })
    }
}

impl std::fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassLevel::Beginner => write!(f, "{}", ClassLevel::BEGINNER),
            ClassLevel::Intermediate => write!(f, "{}", ClassLevel::INTERMEDIATE),
            ClassLevel::Advanced => write!(f, "{}", ClassLevel::ADVANCED),
        }
    }
}

impl std::str::FromStr for ClassLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ClassLevel::BEGINNER => Ok(ClassLevel::Beginner),
            ClassLevel::INTERMEDIATE => Ok(ClassLevel::Intermediate),
            ClassLevel::ADVANCED => Ok(ClassLevel::Advanced),
            _ => Err(format!("Invalid class level: {s}")),
        }
    }
}

/// 单节课次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 课次ID
    pub id: i64,
    // 系列ID，周期课程的第一节为空
    pub series_id: Option<SeriesId>,
    // 所属学校
    pub school_id: i64,
    // 授课教师
    pub teacher_id: i64,
    pub title: String,
    pub level: ClassLevel,
    pub description: Option<String>,
    // 开课时间
    pub starts_at: chrono::DateTime<chrono::Utc>,
    // 时长（分钟）
    pub duration_minutes: i32,
    // 人数上限
    pub max_students: i32,
    // 已报名学员
    pub enrolled_students: BTreeSet<i64>,
    pub is_recurring: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    /// 是否属于指定系列；没有系列 ID 的课次不属于任何系列
    pub fn belongs_to_series(&self, series_id: &SeriesId) -> bool {
        self.series_id.as_ref() == Some(series_id)
    }

    pub fn is_enrolled(&self, user_id: i64) -> bool {
        self.enrolled_students.contains(&user_id)
    }

    /// 剩余名额，超额报名时为 0
    pub fn remaining_seats(&self) -> usize {
        usize::try_from(self.max_students)
            .unwrap_or(0)
            .saturating_sub(self.enrolled_students.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining_seats() == 0
    }
}
