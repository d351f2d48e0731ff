//! 利润分析：营收来自预订，支出来自采购单与在职员工薪资。

use crate::AnalyticsError;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use domain::timestamp::parse_date_text;
use domain::{BookingStatus, PurchaseOrderStatus, StaffStatus};
use hms_storage::{BookingRecord, PurchaseOrderRecord, StaffRecord};
use serde::Serialize;

/// 薪资按 30 天折算为日薪。
const DAYS_PER_MONTH: f64 = 30.0;

/// 采购支出的估算拆分比例（运营 / 人员 / 维修）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseSplit {
    pub operations: f64,
    pub staffing: f64,
    pub maintenance: f64,
}

impl Default for ExpenseSplit {
    fn default() -> Self {
        Self {
            operations: 0.30,
            staffing: 0.45,
            maintenance: 0.25,
        }
    }
}

impl ExpenseSplit {
    /// 各比例非负且合计为 1。
    pub fn new(operations: f64, staffing: f64, maintenance: f64) -> Result<Self, AnalyticsError> {
        if [operations, staffing, maintenance]
            .iter()
            .any(|ratio| !ratio.is_finite() || *ratio < 0.0)
        {
            return Err(AnalyticsError::InvalidSplit(
                "ratios must be non-negative".to_string(),
            ));
        }
        let sum = operations + staffing + maintenance;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(AnalyticsError::InvalidSplit(format!(
                "ratios must sum to 1, got {sum}"
            )));
        }
        Ok(Self {
            operations,
            staffing,
            maintenance,
        })
    }

    fn breakdown(&self, amount: f64) -> Vec<(String, f64)> {
        vec![
            ("operations".to_string(), round_cents(amount * self.operations)),
            ("staffing".to_string(), round_cents(amount * self.staffing)),
            ("maintenance".to_string(), round_cents(amount * self.maintenance)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: i64,
    pub revenue: f64,
    pub procurement: f64,
    pub payroll: f64,
    pub expenses: f64,
    pub profit: f64,
    pub margin_percent: i64,
    /// 采购支出按比例估算的去向。
    pub estimated_breakdown: Vec<(String, f64)>,
}

/// 计算 `[from, to]`（含首尾两天）的利润。
pub fn compute_profit(
    bookings: &[BookingRecord],
    orders: &[PurchaseOrderRecord],
    staff: &[StaffRecord],
    from: NaiveDate,
    to: NaiveDate,
    split: &ExpenseSplit,
) -> Result<ProfitSummary, AnalyticsError> {
    if from > to {
        return Err(AnalyticsError::InvalidPeriod(format!(
            "{from} is after {to}"
        )));
    }
    let start = day_start(from)?;
    let end = to
        .succ_opt()
        .ok_or_else(|| AnalyticsError::InvalidPeriod(format!("{to} out of range")))
        .and_then(day_start)?;
    let in_period = |at: DateTime<Utc>| start <= at && at < end;
    let days = (to - from).num_days() + 1;

    let revenue: f64 = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .filter(|b| parse_date_text(&b.check_in_date).is_some_and(in_period))
        .map(|b| b.total_amount)
        .sum();
    let procurement: f64 = orders
        .iter()
        .filter(|o| o.status != PurchaseOrderStatus::Cancelled)
        .filter(|o| {
            Utc.timestamp_millis_opt(o.ordered_at_ms)
                .single()
                .is_some_and(in_period)
        })
        .map(|o| o.total_amount)
        .sum();
    let monthly_payroll: f64 = staff
        .iter()
        .filter(|s| s.status == StaffStatus::Active)
        .map(|s| s.salary)
        .sum();
    let payroll = round_cents(monthly_payroll * days as f64 / DAYS_PER_MONTH);

    let expenses = round_cents(procurement + payroll);
    let profit = round_cents(revenue - expenses);
    let margin_percent = if revenue > 0.0 {
        (profit / revenue * 100.0).round() as i64
    } else {
        0
    };
    Ok(ProfitSummary {
        from,
        to,
        days,
        revenue: round_cents(revenue),
        procurement: round_cents(procurement),
        payroll,
        expenses,
        profit,
        margin_percent,
        estimated_breakdown: split.breakdown(procurement),
    })
}

fn day_start(date: NaiveDate) -> Result<DateTime<Utc>, AnalyticsError> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| AnalyticsError::InvalidPeriod(format!("{date} out of range")))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_is_valid() {
        let split = ExpenseSplit::default();
        let checked = ExpenseSplit::new(split.operations, split.staffing, split.maintenance)
            .expect("default split");
        assert_eq!(checked, split);
    }

    #[test]
    fn split_must_sum_to_one() {
        assert!(ExpenseSplit::new(0.5, 0.5, 0.5).is_err());
        assert!(ExpenseSplit::new(-0.1, 0.6, 0.5).is_err());
        assert!(ExpenseSplit::new(0.2, 0.3, 0.5).is_ok());
    }

    #[test]
    fn inverted_period_is_rejected() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 1).expect("from");
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).expect("to");
        let err = compute_profit(&[], &[], &[], from, to, &ExpenseSplit::default())
            .expect_err("inverted");
        assert!(matches!(err, AnalyticsError::InvalidPeriod(_)));
    }
}
