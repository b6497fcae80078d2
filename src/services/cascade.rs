//! 级联目标解析
//!
//! 系列范围的操作会作用到同系列、开课时间不早于截止点的所有课次。
//! 修改和删除以当前时间为截止点，报名和取消报名以目标课次自身的开课时间为截止点。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::{Result, ScheduleError};
use crate::models::classes::{
    entities::Class,
    requests::{ClassListQuery, MutationScope},
};
use crate::storage::Storage;

/// 系列级联的截止点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesCutoff {
    /// 当前时间，用于修改与删除
    WallClock,
    /// 目标课次的开课时间，用于报名与取消报名
    FromOccurrence,
}

impl SeriesCutoff {
    pub fn instant(self, target: &Class, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            SeriesCutoff::WallClock => now,
            SeriesCutoff::FromOccurrence => target.starts_at,
        }
    }
}

/// 读取目标课次，不存在时返回 `NotFound`
pub(crate) async fn load_target(storage: &Arc<dyn Storage>, class_id: i64) -> Result<Class> {
    storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ScheduleError::not_found(format!("Class {class_id} not found")))
}

/// 计算一次操作要作用的课次 ID
///
/// 没有系列 ID 的课次（包括系列的第一节）只作用于自身。
pub(crate) async fn resolve_targets(
    storage: &Arc<dyn Storage>,
    target: &Class,
    scope: MutationScope,
    cutoff: SeriesCutoff,
) -> Result<Vec<i64>> {
    let series_id = match (&target.series_id, scope.applies_to_series()) {
        (Some(series_id), true) => series_id.clone(),
        _ => return Ok(vec![target.id]),
    };

    let from = cutoff.instant(target, Utc::now());
    let ids: Vec<i64> = storage
        .list_classes(ClassListQuery::series_from(series_id.clone(), from))
        .await?
        .into_iter()
        .map(|class| class.id)
        .collect();

    debug!(
        "Series {} resolved to {} occurrences from {} ({:?})",
        series_id,
        ids.len(),
        from,
        cutoff
    );

    Ok(ids)
}
