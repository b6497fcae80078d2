//! 课次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub series_id: Option<String>,
    pub school_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub level: String,
    pub description: Option<String>,
    pub starts_at: i64,
    pub duration_minutes: i32,
    pub max_students: i32,
    pub is_recurring: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::class_enrollments::Entity")]
    Enrollments,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::class_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，报名名单由存储层另行填充
impl Model {
    pub fn into_class(
        self,
        enrolled_students: std::collections::BTreeSet<i64>,
    ) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{Class, ClassLevel};
        use chrono::{DateTime, Utc};

        Class {
            id: self.id,
            series_id: self.series_id.map(Into::into),
            school_id: self.school_id,
            teacher_id: self.teacher_id,
            title: self.title,
            level: self
                .level
                .parse::<ClassLevel>()
                .unwrap_or(ClassLevel::Beginner),
            description: self.description,
            starts_at: DateTime::<Utc>::from_timestamp(self.starts_at, 0).unwrap_or_default(),
            duration_minutes: self.duration_minutes,
            max_students: self.max_students,
            enrolled_students,
            is_recurring: self.is_recurring,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
