//! 周营收分桶与环比增长。
//!
//! 以 `now` 所在日的零点为锚点向前切出 4 个 7 天窗口，
//! 第 k 个窗口（0 为最近）为半开区间
//! `[sod - (7(k+1) - 1) 天, sod - 7k + 1 天)`，窗口之间首尾相接、互不重叠。

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::BookingStatus;
use domain::timestamp::parse_date_text;
use hms_storage::BookingRecord;
use serde::Serialize;

pub const WEEK_COUNT: usize = 4;

/// 参与分桶的一条营收。`at` 为 `None` 表示日期无法解析，计算时排除。
#[derive(Debug, Clone)]
pub struct RevenueEntry {
    pub at: Option<DateTime<Utc>>,
    pub amount: f64,
    pub cancelled: bool,
}

impl RevenueEntry {
    /// 预订按入住日期计入营收。
    pub fn from_booking(booking: &BookingRecord) -> Self {
        Self {
            at: parse_date_text(&booking.check_in_date),
            amount: booking.total_amount,
            cancelled: booking.status == BookingStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub revenue: f64,
    pub bookings: u64,
    /// 相对最高一周的百分比。
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyRevenue {
    /// 从旧到新：Week 1 .. Week 4。
    pub weeks: Vec<WeekBucket>,
    pub total: f64,
    pub current_week: f64,
    pub previous_week: f64,
    pub growth_percent: i64,
}

/// 从旧到新的 4 个窗口 `(start, end)`。
pub fn week_windows(now: DateTime<Utc>) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let start_of_day = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(now);
    (0..WEEK_COUNT as i64)
        .rev()
        .map(|k| {
            let start = start_of_day - Duration::days(7 * (k + 1) - 1);
            let end = start_of_day - Duration::days(7 * k - 1);
            (start, end)
        })
        .collect()
}

pub fn weekly_revenue(entries: &[RevenueEntry], now: DateTime<Utc>) -> WeeklyRevenue {
    let mut weeks: Vec<WeekBucket> = week_windows(now)
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| WeekBucket {
            label: format!("Week {}", index + 1),
            start,
            end,
            revenue: 0.0,
            bookings: 0,
            percentage: 0,
        })
        .collect();

    for entry in entries.iter().filter(|entry| !entry.cancelled) {
        let Some(at) = entry.at else {
            continue;
        };
        if let Some(week) = weeks
            .iter_mut()
            .find(|week| week.start <= at && at < week.end)
        {
            week.revenue += entry.amount;
            week.bookings += 1;
        }
    }

    let max = weeks.iter().map(|week| week.revenue).fold(0.0_f64, f64::max);
    for week in &mut weeks {
        week.percentage = if max > 0.0 {
            (week.revenue / max * 100.0).round() as u32
        } else {
            0
        };
    }

    let current_week = weeks.last().map(|week| week.revenue).unwrap_or_default();
    let previous_week = weeks
        .iter()
        .rev()
        .nth(1)
        .map(|week| week.revenue)
        .unwrap_or_default();
    WeeklyRevenue {
        total: weeks.iter().map(|week| week.revenue).sum(),
        current_week,
        previous_week,
        growth_percent: growth_percent(current_week, previous_week),
        weeks,
    }
}

/// 环比增长百分比（四舍五入）；上期不大于 0 时为 0。
pub fn growth_percent(current: f64, previous: f64) -> i64 {
    if previous <= 0.0 {
        return 0;
    }
    ((current - previous) / previous * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_from_previous_week() {
        assert_eq!(growth_percent(150.0, 100.0), 50);
        assert_eq!(growth_percent(50.0, 100.0), -50);
        assert_eq!(growth_percent(0.0, 0.0), 0);
        assert_eq!(growth_percent(120.0, 0.0), 0);
    }

    #[test]
    fn windows_are_contiguous_and_end_after_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 15, 30, 0).single().expect("now");
        let windows = week_windows(now);
        assert_eq!(windows.len(), WEEK_COUNT);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        let last = windows.last().expect("newest");
        assert_eq!(last.1, Utc.with_ymd_and_hms(2024, 3, 21, 0, 0, 0).single().expect("end"));
        assert_eq!(last.0, Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).single().expect("start"));
        assert_eq!(
            windows[0].0,
            Utc.with_ymd_and_hms(2024, 2, 22, 0, 0, 0).single().expect("oldest")
        );
    }
}
