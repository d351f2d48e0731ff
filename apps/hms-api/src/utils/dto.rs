//! Record / 计算结果 → DTO 转换
//!
//! 金额类字段附带按配置货币格式化后的文本。

use api_contract::{
    BookingDto, ChartPointDto, ContactRequestDto, DashboardStatsDto, EmergencyContactDto,
    ExpenseLineDto, ExportLogDto, InventoryActivityDto, InventoryChartPointDto,
    InventoryDashboardStatsDto, InventoryItemDto, MetricsSnapshotDto, PaymentDto,
    PaymentSummaryDto, ProfitDto, PurchaseOrderDto, ReportDto, RoomDto, StaffDto,
    StaffSummaryDto, WeekRevenueDto, WeeklyRevenueDto,
};
use chrono::Duration;
use hms_analytics::{
    CategoryStock, DashboardSnapshot, InventoryOverview, PaymentSummary, ProfitSummary,
    StaffSummary, WeeklyRevenue, format_currency,
};
use hms_storage::{
    BookingRecord, ContactRequestRecord, EmergencyContact, ExportLogRecord,
    InventoryActivityRecord, InventoryItemRecord, PaymentRecord, PurchaseOrderRecord,
    ReportRecord, RoomRecord, StaffRecord,
};
use hms_telemetry::MetricsSnapshot;

pub fn booking_to_dto(record: BookingRecord) -> BookingDto {
    BookingDto {
        booking_id: record.booking_id,
        hotel_id: record.hotel_id,
        guest_user_id: record.guest_user_id,
        guest_name: record.guest_name,
        guest_email: record.guest_email,
        room_number: record.room_number,
        check_in_date: record.check_in_date,
        check_out_date: record.check_out_date,
        status: record.status,
        total_amount: record.total_amount,
        archived: record.archived,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

pub fn room_to_dto(record: RoomRecord) -> RoomDto {
    RoomDto {
        room_id: record.room_id,
        hotel_id: record.hotel_id,
        room_number: record.room_number,
        room_type: record.room_type,
        floor: record.floor,
        price_per_night: record.price_per_night,
        status: record.status,
    }
}

pub fn inventory_item_to_dto(record: InventoryItemRecord) -> InventoryItemDto {
    let low_stock = record.is_low_stock();
    InventoryItemDto {
        item_id: record.item_id,
        hotel_id: record.hotel_id,
        name: record.name,
        category: record.category,
        current_stock: record.current_stock,
        reorder_level: record.reorder_level,
        unit_price: record.unit_price,
        supplier: record.supplier,
        unit: record.unit,
        location: record.location,
        image: record.image,
        low_stock,
    }
}

pub fn inventory_activity_to_dto(record: InventoryActivityRecord) -> InventoryActivityDto {
    InventoryActivityDto {
        activity_id: record.activity_id,
        item_id: record.item_id,
        item_name: record.item_name,
        kind: record.kind,
        quantity_delta: record.quantity_delta,
        stock_after: record.stock_after,
        actor_id: record.actor_id,
        at_ms: record.at_ms,
    }
}

pub fn inventory_overview_to_dto(
    overview: InventoryOverview,
    currency: &str,
) -> InventoryDashboardStatsDto {
    InventoryDashboardStatsDto {
        total_items: overview.total_items,
        low_stock_items: overview.low_stock_items,
        out_of_stock_items: overview.out_of_stock_items,
        category_count: overview.category_count,
        total_value: overview.total_value,
        total_value_formatted: format_currency(overview.total_value, currency),
    }
}

pub fn category_stock_to_dto(point: CategoryStock) -> InventoryChartPointDto {
    InventoryChartPointDto {
        category: point.category,
        item_count: point.item_count,
        stock: point.stock,
        value: point.value,
    }
}

pub fn purchase_order_to_dto(record: PurchaseOrderRecord) -> PurchaseOrderDto {
    PurchaseOrderDto {
        order_id: record.order_id,
        hotel_id: record.hotel_id,
        supplier: record.supplier,
        description: record.description,
        total_amount: record.total_amount,
        status: record.status,
        ordered_at_ms: record.ordered_at_ms,
    }
}

pub fn emergency_contact_from_dto(dto: EmergencyContactDto) -> EmergencyContact {
    EmergencyContact {
        name: dto.name,
        phone: dto.phone,
        relationship: dto.relationship,
    }
}

pub fn staff_to_dto(record: StaffRecord) -> StaffDto {
    StaffDto {
        staff_id: record.staff_id,
        hotel_id: record.hotel_id,
        name: record.name,
        email: record.email,
        phone: record.phone,
        role: record.role,
        department: record.department,
        position: record.position,
        status: record.status,
        permissions: record.permissions,
        salary: record.salary,
        emergency_contact: record.emergency_contact.map(|contact| EmergencyContactDto {
            name: contact.name,
            phone: contact.phone,
            relationship: contact.relationship,
        }),
        hired_at: record.hired_at,
    }
}

pub fn staff_summary_to_dto(summary: StaffSummary) -> StaffSummaryDto {
    StaffSummaryDto {
        total: summary.total,
        active: summary.active,
        by_status: summary.count_by_status,
        by_department: summary.count_by_department,
        monthly_payroll: summary.monthly_payroll,
    }
}

pub fn payment_to_dto(record: PaymentRecord) -> PaymentDto {
    PaymentDto {
        payment_id: record.payment_id,
        hotel_id: record.hotel_id,
        guest_name: record.guest_name,
        room_number: record.room_number,
        amount: record.amount,
        payment_method: record.payment_method,
        status: record.status,
        transaction_at_ms: record.transaction_at_ms,
        reference: record.reference,
        description: record.description,
    }
}

pub fn payment_summary_to_dto(summary: PaymentSummary, currency: &str) -> PaymentSummaryDto {
    PaymentSummaryDto {
        total_transactions: summary.total_transactions,
        completed_amount: summary.completed_amount,
        refunded_amount: summary.refunded_amount,
        pending_count: summary.pending_count,
        failed_count: summary.failed_count,
        amount_by_method: summary.amount_by_method,
        count_by_status: summary.count_by_status,
        completed_amount_formatted: format_currency(summary.completed_amount, currency),
    }
}

pub fn report_to_dto(record: ReportRecord) -> ReportDto {
    ReportDto {
        report_id: record.report_id,
        hotel_id: record.hotel_id,
        report_type: record.report_type,
        date_from: record.date_from,
        date_to: record.date_to,
        summary: record.summary,
        chart_data: record
            .chart_data
            .into_iter()
            .map(|point| ChartPointDto {
                label: point.label,
                value: point.value,
            })
            .collect(),
        table_data: record.table_data,
        generated_by: record.generated_by,
        generated_at_ms: record.generated_at_ms,
    }
}

pub fn export_log_to_dto(record: ExportLogRecord) -> ExportLogDto {
    ExportLogDto {
        export_id: record.export_id,
        report_id: record.report_id,
        report_type: record.report_type,
        file_name: record.file_name,
        row_count: record.row_count,
        exported_by: record.exported_by,
        exported_at_ms: record.exported_at_ms,
    }
}

pub fn contact_request_to_dto(record: ContactRequestRecord) -> ContactRequestDto {
    ContactRequestDto {
        request_id: record.request_id,
        reference_number: record.reference_number,
        user_id: record.user_id,
        name: record.name,
        email: record.email,
        phone: record.phone,
        inquiry_type: record.inquiry_type,
        booking_reference: record.booking_reference,
        subject: record.subject,
        message: record.message,
        status: record.status,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

pub fn dashboard_to_dto(snapshot: DashboardSnapshot, currency: &str) -> DashboardStatsDto {
    let stats = snapshot.stats;
    DashboardStatsDto {
        total_bookings: stats.total_bookings,
        pending_bookings: stats.pending_bookings,
        confirmed_bookings: stats.confirmed_bookings,
        checked_in_bookings: stats.checked_in_bookings,
        cancelled_bookings: stats.cancelled_bookings,
        today_check_ins: stats.today_check_ins,
        total_rooms: stats.total_rooms,
        available_rooms: stats.available_rooms,
        occupied_rooms: stats.occupied_rooms,
        occupancy_rate: stats.occupancy_rate,
        total_revenue: stats.total_revenue,
        total_revenue_formatted: format_currency(stats.total_revenue, currency),
        inventory_items: stats.inventory_items,
        low_stock_items: stats.low_stock_items,
        total_staff: stats.total_staff,
        active_staff: stats.active_staff,
        source: snapshot.source.as_str().to_string(),
        updated_at_ms: snapshot.updated_at_ms,
    }
}

/// 周窗口为半开区间，展示时结束日期取窗口内最后一天。
pub fn weekly_revenue_to_dto(weekly: WeeklyRevenue, currency: &str) -> WeeklyRevenueDto {
    WeeklyRevenueDto {
        weeks: weekly
            .weeks
            .into_iter()
            .map(|week| WeekRevenueDto {
                start: week.start.format("%Y-%m-%d").to_string(),
                end: (week.end - Duration::days(1)).format("%Y-%m-%d").to_string(),
                revenue_formatted: format_currency(week.revenue, currency),
                label: week.label,
                revenue: week.revenue,
                percentage: week.percentage,
                bookings: week.bookings,
            })
            .collect(),
        total: weekly.total,
        current_week: weekly.current_week,
        previous_week: weekly.previous_week,
        growth_percent: weekly.growth_percent,
    }
}

pub fn profit_to_dto(summary: ProfitSummary, currency: &str) -> ProfitDto {
    ProfitDto {
        from: summary.from.format("%Y-%m-%d").to_string(),
        to: summary.to.format("%Y-%m-%d").to_string(),
        revenue: summary.revenue,
        procurement: summary.procurement,
        payroll: summary.payroll,
        expenses: summary.expenses,
        profit: summary.profit,
        margin_percent: summary.margin_percent,
        estimated_breakdown: summary
            .estimated_breakdown
            .into_iter()
            .map(|(category, amount)| ExpenseLineDto { category, amount })
            .collect(),
        profit_formatted: format_currency(summary.profit, currency),
    }
}

pub fn metrics_to_dto(snapshot: MetricsSnapshot) -> MetricsSnapshotDto {
    MetricsSnapshotDto {
        bookings_created: snapshot.bookings_created,
        booking_status_changes: snapshot.booking_status_changes,
        contact_requests_submitted: snapshot.contact_requests_submitted,
        contact_requests_rejected: snapshot.contact_requests_rejected,
        reports_generated: snapshot.reports_generated,
        reports_exported: snapshot.reports_exported,
        dashboard_computations: snapshot.dashboard_computations,
        dashboard_cache_hits: snapshot.dashboard_cache_hits,
        dashboard_fallbacks: snapshot.dashboard_fallbacks,
        change_events_published: snapshot.change_events_published,
    }
}
