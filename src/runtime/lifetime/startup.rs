use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::classes::requests::ClassListQuery;
use crate::storage::Storage;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 输出配置学校的概况
async fn report_school(storage: &Arc<dyn Storage>, school_id: i64) -> Result<()> {
    let Some(school) = storage.get_school_by_id(school_id).await? else {
        warn!("Configured school {} does not exist", school_id);
        return Ok(());
    };

    let upcoming = storage
        .list_classes(ClassListQuery::upcoming_for_school(school_id, Utc::now()))
        .await?;

    info!(
        "School '{}' has {} teachers and {} upcoming classes",
        school.name,
        school.teacher_ids.len(),
        upcoming.len()
    );
    if let Some(next) = upcoming.first() {
        info!("Next class: '{}' at {}", next.title, next.starts_at);
    }

    Ok(())
}

/// 准备启动上下文：连接存储并运行迁移
pub async fn prepare_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if let Some(school_id) = config.app.school_id {
        report_school(&storage, school_id).await?;
    }

    Ok(StartupContext { storage })
}
