use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// 学校实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub email: String,
    pub logo: Option<String>,
    pub instagram: Option<String>,
    // 任教教师
    pub teacher_ids: BTreeSet<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
