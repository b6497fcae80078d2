//! 排课核心：周期课次生成与系列标识

pub mod occurrences;
pub mod series;

pub use occurrences::{
    OCCURRENCE_STEP_DAYS, generate_occurrences, series_horizon, weekly_occurrences,
};
pub use series::{SeriesId, assign_series_ids};
