#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use rust_studio_schedule::config::{BatchConfig, DatabaseConfig};
use rust_studio_schedule::models::classes::{entities::ClassLevel, requests::CreateClassRequest};
use rust_studio_schedule::models::schools::requests::CreateSchoolRequest;
use rust_studio_schedule::models::users::{entities::UserRole, requests::CreateUserRequest};
use rust_studio_schedule::storage::{Storage, sea_orm_storage::SeaOrmStorage};

/// 独立的内存数据库，单连接
pub async fn memory_storage(batch: BatchConfig) -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
        batch,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage should connect");
    Arc::new(storage)
}

pub struct Studio {
    pub storage: Arc<dyn Storage>,
    pub school_id: i64,
    pub teacher_id: i64,
    pub student_ids: Vec<i64>,
}

/// 一所学校、一名教师和若干学员
pub async fn studio(batch: BatchConfig, students: usize) -> Studio {
    let storage = memory_storage(batch).await;

    let school = storage
        .create_school(CreateSchoolRequest {
            name: "Lotus Studio".to_string(),
            address: "12 Harbour Road".to_string(),
            email: "hello@lotus.example".to_string(),
            logo: None,
            instagram: Some("@lotus".to_string()),
        })
        .await
        .unwrap();

    let teacher = storage
        .create_user(CreateUserRequest {
            email: "teacher@lotus.example".to_string(),
            name: "Mira".to_string(),
            password_hash: "unused".to_string(),
            role: UserRole::Teacher,
            school_id: Some(school.id),
        })
        .await
        .unwrap();
    storage
        .add_school_teacher(school.id, teacher.id)
        .await
        .unwrap();

    let mut student_ids = Vec::new();
    for n in 0..students {
        let student = storage
            .create_user(CreateUserRequest {
                email: format!("student{n}@lotus.example"),
                name: format!("Student {n}"),
                password_hash: "unused".to_string(),
                role: UserRole::Student,
                school_id: Some(school.id),
            })
            .await
            .unwrap();
        student_ids.push(student.id);
    }

    Studio {
        storage,
        school_id: school.id,
        teacher_id: teacher.id,
        student_ids,
    }
}

/// 下一个周一 18:00（UTC），至少在一天之后
pub fn next_monday_evening() -> DateTime<Utc> {
    let today = Utc::now().date_naive() + Duration::days(1);
    let offset = (7 - today.weekday().num_days_from_monday() as i64) % 7;
    let day = today + Duration::days(offset);
    Utc.from_utc_datetime(&day.and_hms_opt(18, 0, 0).unwrap())
}

/// 当前时间向前若干天，截断到秒
pub fn days_ago(days: i64) -> DateTime<Utc> {
    let at = Utc::now() - Duration::days(days) - Duration::hours(1);
    Utc.timestamp_opt(at.timestamp(), 0).unwrap()
}

pub fn class_request(studio: &Studio, starts_at: DateTime<Utc>, recurring: bool) -> CreateClassRequest {
    CreateClassRequest {
        school_id: studio.school_id,
        teacher_id: studio.teacher_id,
        title: "Monday Vinyasa".to_string(),
        level: ClassLevel::Intermediate,
        description: Some("Strong flow".to_string()),
        starts_at,
        duration_minutes: 60,
        max_students: 12,
        is_recurring: recurring,
    }
}
