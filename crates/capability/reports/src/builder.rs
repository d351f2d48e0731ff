//! 各类型报表的汇总、图表与表格构建。

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use domain::timestamp::parse_date_text;
use domain::{BookingStatus, PaymentStatus, RoomStatus, StaffStatus};
use hms_analytics::{inventory_chart, inventory_overview, occupancy_rate, payment_summary, staff_summary};
use hms_storage::{
    BookingRecord, ChartPoint, InventoryItemRecord, PaymentRecord, RoomRecord, StaffRecord,
    TableRow,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// 报表统计区间 `[from, to]`（含首尾两天）。
#[derive(Debug, Clone, Copy)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        self.from <= date && date <= self.to
    }

    fn contains_ms(&self, at_ms: i64) -> bool {
        Utc.timestamp_millis_opt(at_ms)
            .single()
            .is_some_and(|at| self.contains(at))
    }
}

/// 报表内容（尚未附加元数据）。
#[derive(Debug, Default)]
pub struct ReportBody {
    pub summary: BTreeMap<String, f64>,
    pub chart_data: Vec<ChartPoint>,
    pub table_data: Vec<TableRow>,
}

fn table_row(value: Value) -> TableRow {
    match value {
        Value::Object(map) => map,
        _ => TableRow::new(),
    }
}

fn point(label: impl Into<String>, value: f64) -> ChartPoint {
    ChartPoint {
        label: label.into(),
        value,
    }
}

fn bookings_in_period<'a>(
    bookings: &'a [BookingRecord],
    period: &'a Period,
) -> impl Iterator<Item = &'a BookingRecord> + 'a {
    bookings.iter().filter(move |booking| {
        parse_date_text(&booking.check_in_date).is_some_and(|at| period.contains(at))
    })
}

pub fn occupancy(rooms: &[RoomRecord], bookings: &[BookingRecord], period: &Period) -> ReportBody {
    let total = rooms.len() as u64;
    let available = rooms
        .iter()
        .filter(|room| room.status == RoomStatus::Available)
        .count() as u64;
    let in_period: Vec<&BookingRecord> = bookings_in_period(bookings, period)
        .filter(|booking| booking.status != BookingStatus::Cancelled)
        .collect();

    let mut summary = BTreeMap::new();
    summary.insert("totalRooms".to_string(), total as f64);
    summary.insert("availableRooms".to_string(), available as f64);
    summary.insert("occupiedRooms".to_string(), (total - available.min(total)) as f64);
    summary.insert("occupancyRate".to_string(), occupancy_rate(total, available) as f64);
    summary.insert("bookingsInPeriod".to_string(), in_period.len() as f64);

    let chart_data = RoomStatus::ALL
        .iter()
        .map(|status| {
            let count = rooms.iter().filter(|room| room.status == *status).count();
            point(status.as_str(), count as f64)
        })
        .collect();

    let table_data = rooms
        .iter()
        .map(|room| {
            let stays = in_period
                .iter()
                .filter(|booking| booking.room_number == room.room_number)
                .count();
            table_row(json!({
                "roomNumber": room.room_number,
                "roomType": room.room_type,
                "floor": room.floor,
                "status": room.status.as_str(),
                "bookings": stays,
            }))
        })
        .collect();

    ReportBody {
        summary,
        chart_data,
        table_data,
    }
}

pub fn revenue(bookings: &[BookingRecord], period: &Period) -> ReportBody {
    let counted: Vec<&BookingRecord> = bookings_in_period(bookings, period)
        .filter(|booking| booking.status != BookingStatus::Cancelled)
        .collect();
    let total: f64 = counted.iter().map(|booking| booking.total_amount).sum();

    let mut summary = BTreeMap::new();
    summary.insert("totalRevenue".to_string(), total);
    summary.insert("bookings".to_string(), counted.len() as f64);
    summary.insert(
        "averageBookingValue".to_string(),
        if counted.is_empty() {
            0.0
        } else {
            total / counted.len() as f64
        },
    );

    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for booking in &counted {
        if let Some(at) = parse_date_text(&booking.check_in_date) {
            *by_day.entry(at.date_naive()).or_default() += booking.total_amount;
        }
    }
    let chart_data = by_day
        .into_iter()
        .map(|(day, amount)| point(day.format("%Y-%m-%d").to_string(), amount))
        .collect();

    let table_data = counted
        .iter()
        .map(|booking| {
            table_row(json!({
                "bookingId": booking.booking_id,
                "guestName": booking.guest_name,
                "roomNumber": booking.room_number,
                "checkIn": booking.check_in_date,
                "checkOut": booking.check_out_date,
                "status": booking.status.as_str(),
                "amount": booking.total_amount,
            }))
        })
        .collect();

    ReportBody {
        summary,
        chart_data,
        table_data,
    }
}

/// 库存为当前快照，不受区间影响。
pub fn inventory(items: &[InventoryItemRecord]) -> ReportBody {
    let overview = inventory_overview(items);
    let mut summary = BTreeMap::new();
    summary.insert("totalItems".to_string(), overview.total_items as f64);
    summary.insert("lowStockItems".to_string(), overview.low_stock_items as f64);
    summary.insert("outOfStockItems".to_string(), overview.out_of_stock_items as f64);
    summary.insert("totalValue".to_string(), overview.total_value);

    let chart_data = inventory_chart(items)
        .into_iter()
        .map(|category| point(category.category, category.value))
        .collect();

    let table_data = items
        .iter()
        .map(|item| {
            table_row(json!({
                "name": item.name,
                "category": item.category,
                "currentStock": item.current_stock,
                "reorderLevel": item.reorder_level,
                "unitPrice": item.unit_price,
                "value": item.stock_value(),
                "lowStock": item.is_low_stock(),
                "supplier": item.supplier,
            }))
        })
        .collect();

    ReportBody {
        summary,
        chart_data,
        table_data,
    }
}

pub fn staff(members: &[StaffRecord]) -> ReportBody {
    let overview = staff_summary(members);
    let mut summary = BTreeMap::new();
    summary.insert("totalStaff".to_string(), overview.total as f64);
    summary.insert("activeStaff".to_string(), overview.active as f64);
    summary.insert(
        "onLeave".to_string(),
        members
            .iter()
            .filter(|member| member.status == StaffStatus::OnLeave)
            .count() as f64,
    );
    summary.insert("monthlyPayroll".to_string(), overview.monthly_payroll);

    let chart_data = overview
        .count_by_department
        .into_iter()
        .map(|(department, count)| point(department, count as f64))
        .collect();

    let table_data = members
        .iter()
        .map(|member| {
            table_row(json!({
                "name": member.name,
                "role": member.role.as_str(),
                "department": member.department,
                "position": member.position,
                "status": member.status.as_str(),
                "salary": member.salary,
            }))
        })
        .collect();

    ReportBody {
        summary,
        chart_data,
        table_data,
    }
}

pub fn payments(records: &[PaymentRecord], period: &Period) -> ReportBody {
    let in_period: Vec<PaymentRecord> = records
        .iter()
        .filter(|payment| period.contains_ms(payment.transaction_at_ms))
        .cloned()
        .collect();
    let overview = payment_summary(&in_period);

    let mut summary = BTreeMap::new();
    summary.insert("totalTransactions".to_string(), overview.total_transactions as f64);
    summary.insert("completedAmount".to_string(), overview.completed_amount);
    summary.insert("refundedAmount".to_string(), overview.refunded_amount);
    summary.insert("pendingCount".to_string(), overview.pending_count as f64);
    summary.insert("failedCount".to_string(), overview.failed_count as f64);

    let chart_data = overview
        .amount_by_method
        .into_iter()
        .map(|(method, amount)| point(method, amount))
        .collect();

    let table_data = in_period
        .iter()
        .map(|payment| {
            let at = Utc
                .timestamp_millis_opt(payment.transaction_at_ms)
                .single()
                .map(|at| at.to_rfc3339());
            let signed_amount = if payment.status == PaymentStatus::Refunded {
                -payment.amount
            } else {
                payment.amount
            };
            table_row(json!({
                "reference": payment.reference,
                "guestName": payment.guest_name,
                "roomNumber": payment.room_number,
                "method": payment.payment_method.as_str(),
                "status": payment.status.as_str(),
                "amount": signed_amount,
                "transactionAt": at,
                "description": payment.description,
            }))
        })
        .collect();

    ReportBody {
        summary,
        chart_data,
        table_data,
    }
}
