//! 周期课次生成
//!
//! 以固定 7 天为步长（UTC 运算，不考虑时区规则）从开始时间向后展开，
//! 直到一年期限为止。

use chrono::{DateTime, Duration, Months, Utc};

/// 相邻课次间隔天数
pub const OCCURRENCE_STEP_DAYS: i64 = 7;

/// 系列的时间跨度（自然月）
const HORIZON_MONTHS: u32 = 12;

/// 计算系列的截止时间：开始时间后一年
pub fn series_horizon(start: DateTime<Utc>) -> DateTime<Utc> {
    start
        .checked_add_months(Months::new(HORIZON_MONTHS))
        .unwrap_or_else(|| start + Duration::days(365))
}

/// 生成 `[start, horizon_end)` 区间内的每周课次
///
/// 结果严格递增，且总是包含 `start` 本身。
pub fn generate_occurrences(
    start: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let step = Duration::days(OCCURRENCE_STEP_DAYS);
    let mut occurrences = vec![start];

    let mut next = start.checked_add_signed(step);
    while let Some(at) = next {
        if at >= horizon_end {
            break;
        }
        occurrences.push(at);
        next = at.checked_add_signed(step);
    }

    occurrences
}

/// 从开始时间起一年内的每周课次
pub fn weekly_occurrences(start: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    generate_occurrences(start, series_horizon(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike, Weekday};

    fn monday_evening() -> DateTime<Utc> {
        // 2026-01-05 是星期一
        Utc.with_ymd_and_hms(2026, 1, 5, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_weekly_series_covers_one_year() {
        let start = monday_evening();
        let occurrences = weekly_occurrences(start);

        assert!(occurrences.len() >= 52);
        assert_eq!(occurrences.len(), 53);
        assert_eq!(occurrences[0], start);

        let horizon = series_horizon(start);
        assert!(occurrences.iter().all(|at| *at >= start && *at < horizon));
    }

    #[test]
    fn test_occurrences_are_exactly_one_week_apart() {
        let occurrences = weekly_occurrences(monday_evening());

        for pair in occurrences.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(7));
        }
        assert!(
            occurrences
                .iter()
                .all(|at| at.weekday() == Weekday::Mon && at.hour() == 18 && at.minute() == 0)
        );
    }

    #[test]
    fn test_horizon_is_exclusive() {
        let start = monday_evening();
        let horizon = start + Duration::days(21);

        let occurrences = generate_occurrences(start, horizon);
        assert_eq!(occurrences.len(), 3);
        assert!(!occurrences.contains(&horizon));
    }

    #[test]
    fn test_never_empty() {
        let start = monday_evening();
        assert_eq!(generate_occurrences(start, start), vec![start]);
        assert_eq!(
            generate_occurrences(start, start - Duration::days(1)),
            vec![start]
        );
    }

    #[test]
    fn test_deterministic() {
        let start = monday_evening();
        assert_eq!(weekly_occurrences(start), weekly_occurrences(start));
    }

    #[test]
    fn test_leap_day_horizon() {
        let start = Utc.with_ymd_and_hms(2028, 2, 29, 9, 30, 0).unwrap();
        let horizon = series_horizon(start);
        assert_eq!(horizon.year(), 2029);
        assert_eq!(horizon.month(), 2);
        assert_eq!(horizon.day(), 28);
    }
}
