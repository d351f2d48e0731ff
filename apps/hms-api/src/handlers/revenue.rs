//! 营收分析 handlers：`GET /revenue/weekly`、`GET /revenue/profit?from=&to=`
//!
//! 两者都统计活跃与归档两个集合的预订。

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::{profit_to_dto, weekly_revenue_to_dto};
use crate::utils::response::{bad_request_error, internal_error, ok, storage_error};
use api_contract::PeriodQuery;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use chrono::{Duration, NaiveDate, Utc};
use domain::{HotelContext, permissions};
use hms_analytics::{
    AnalyticsError, ExpenseSplit, RevenueEntry, compute_profit,
    weekly_revenue as bucket_weekly_revenue,
};
use hms_storage::{BookingFilter, BookingRecord, StorageError};

/// 未指定区间时的默认天数（含今天）。
const DEFAULT_PERIOD_DAYS: i64 = 30;

async fn all_bookings(
    state: &AppState,
    ctx: &HotelContext,
) -> Result<Vec<BookingRecord>, StorageError> {
    let mut bookings = state
        .booking_store
        .list_bookings(ctx, &BookingFilter::default())
        .await?;
    bookings.extend(state.booking_store.list_archived_bookings(ctx).await?);
    Ok(bookings)
}

fn parse_day(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, Response> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| bad_request_error(format!("{field} must be YYYY-MM-DD"))),
        None => Ok(None),
    }
}

/// 缺省 `to` 为今天，缺省 `from` 为 `to` 往前 29 天。
fn resolve_period(query: &PeriodQuery, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), Response> {
    let to = parse_day(query.to.as_deref(), "to")?.unwrap_or(today);
    let from = match parse_day(query.from.as_deref(), "from")? {
        Some(from) => from,
        None => to
            .checked_sub_signed(Duration::days(DEFAULT_PERIOD_DAYS - 1))
            .ok_or_else(|| bad_request_error("to is out of range"))?,
    };
    Ok((from, to))
}

pub async fn weekly_revenue(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REVENUE_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let bookings = match all_bookings(&state, &ctx).await {
        Ok(bookings) => bookings,
        Err(err) => return storage_error(err),
    };
    let entries: Vec<RevenueEntry> = bookings.iter().map(RevenueEntry::from_booking).collect();
    let weekly = bucket_weekly_revenue(&entries, Utc::now());
    ok(weekly_revenue_to_dto(weekly, &state.currency))
}

pub async fn profit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REVENUE_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let (from, to) = match resolve_period(&query, Utc::now().date_naive()) {
        Ok(period) => period,
        Err(response) => return response,
    };
    let bookings = match all_bookings(&state, &ctx).await {
        Ok(bookings) => bookings,
        Err(err) => return storage_error(err),
    };
    let orders = match state.purchase_order_store.list_orders(&ctx).await {
        Ok(orders) => orders,
        Err(err) => return storage_error(err),
    };
    let staff = match state.staff_store.list_staff(&ctx).await {
        Ok(staff) => staff,
        Err(err) => return storage_error(err),
    };
    match compute_profit(&bookings, &orders, &staff, from, to, &ExpenseSplit::default()) {
        Ok(summary) => ok(profit_to_dto(summary, &state.currency)),
        Err(AnalyticsError::InvalidPeriod(message)) => bad_request_error(message),
        Err(AnalyticsError::Storage(err)) => storage_error(err),
        Err(err) => internal_error(err.to_string()),
    }
}
