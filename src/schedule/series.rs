//! 系列标识
//!
//! 一次周期创建生成一个新的系列 ID。第一节课次不携带系列 ID，
//! 其余课次共享同一个值，因此级联操作永远不会触及第一节。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::classes::requests::NewClass;

/// 系列标识，与任何课次 ID 都不相同
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    /// 生成新的随机系列 ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 为一组课次分配系列 ID
///
/// 第一节置空，其余课次共享一次新生成的 ID。
pub fn assign_series_ids(occurrences: Vec<NewClass>) -> Vec<NewClass> {
    let series_id = SeriesId::generate();

    occurrences
        .into_iter()
        .enumerate()
        .map(|(index, mut occurrence)| {
            occurrence.series_id = if index == 0 {
                None
            } else {
                Some(series_id.clone())
            };
            occurrence
        })
        .collect()
}
