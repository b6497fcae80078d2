//! 学校实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub email: String,
    pub logo: Option<String>,
    pub instagram: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::school_teachers::Entity")]
    SchoolTeachers,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::school_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_school(
        self,
        teacher_ids: std::collections::BTreeSet<i64>,
    ) -> crate::models::schools::entities::School {
        use crate::models::schools::entities::School;
        use chrono::{DateTime, Utc};

        School {
            id: self.id,
            name: self.name,
            address: self.address,
            email: self.email,
            logo: self.logo,
            instagram: self.instagram,
            teacher_ids,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
