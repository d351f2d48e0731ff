use chrono::{TimeZone, Utc};
use domain::{HotelContext, ReportType};
use hms_reports::{ReportError, ReportService, ReportSources};
use hms_storage::{
    InMemoryBookingStore, InMemoryExportLogStore, InMemoryInventoryStore, InMemoryPaymentStore,
    InMemoryReportStore, InMemoryRoomStore, InMemoryStaffStore, demo_data,
};
use std::sync::Arc;

const HOTEL: &str = "hotel-1";

fn ctx() -> HotelContext {
    HotelContext::new(HOTEL, "user-1", vec![], vec![])
}

fn service() -> ReportService {
    let now = Utc
        .with_ymd_and_hms(2024, 3, 20, 12, 0, 0)
        .single()
        .expect("now")
        .timestamp_millis();
    let data = demo_data(HOTEL, now);
    ReportService::new(ReportSources {
        bookings: Arc::new(InMemoryBookingStore::with_bookings(data.bookings)),
        rooms: Arc::new(InMemoryRoomStore::with_rooms(data.rooms)),
        inventory: Arc::new(InMemoryInventoryStore::with_items(data.inventory)),
        staff: Arc::new(InMemoryStaffStore::with_staff(data.staff)),
        payments: Arc::new(InMemoryPaymentStore::with_payments(data.payments)),
        reports: Arc::new(InMemoryReportStore::new()),
        export_logs: Arc::new(InMemoryExportLogStore::new()),
    })
}

#[tokio::test]
async fn revenue_report_includes_archived_bookings() {
    let service = service();

    let march = service
        .generate(&ctx(), ReportType::Revenue, "2024-03-01", "2024-03-31", "user-1")
        .await
        .expect("march");
    assert_eq!(march.summary.get("totalRevenue"), Some(&1970.0));
    assert_eq!(march.summary.get("bookings"), Some(&4.0));
    assert_eq!(march.table_data.len(), 4);

    let with_february = service
        .generate(&ctx(), ReportType::Revenue, "2024-02-01", "2024-03-31", "user-1")
        .await
        .expect("feb-mar");
    assert_eq!(with_february.summary.get("totalRevenue"), Some(&2330.0));

    let listed = service.list(&ctx()).await.expect("list");
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn occupancy_report_lists_every_room() {
    let report = service()
        .generate(&ctx(), ReportType::Occupancy, "2024-03-01", "2024-03-31", "user-1")
        .await
        .expect("occupancy");
    assert_eq!(report.summary.get("totalRooms"), Some(&6.0));
    assert_eq!(report.summary.get("occupancyRate"), Some(&67.0));
    assert_eq!(report.table_data.len(), 6);
    let keys: Vec<&String> = report.table_data[0].keys().collect();
    assert_eq!(keys, vec!["roomNumber", "roomType", "floor", "status", "bookings"]);
}

#[tokio::test]
async fn payments_report_signs_refunds() {
    let report = service()
        .generate(&ctx(), ReportType::Payments, "2024-03-01", "2024-03-31", "user-1")
        .await
        .expect("payments");
    assert_eq!(report.table_data.len(), 3);
    let amount = |reference: &str| {
        report
            .table_data
            .iter()
            .find(|row| row["reference"] == reference)
            .and_then(|row| row["amount"].as_f64())
            .expect("row")
    };
    assert_eq!(amount("TXN-0001"), 380.0);
    assert_eq!(amount("TXN-0003"), -210.0);
}

#[tokio::test]
async fn export_writes_log_and_csv() {
    let service = service();
    let report = service
        .generate(&ctx(), ReportType::Inventory, "2024-03-01", "2024-03-31", "user-1")
        .await
        .expect("inventory");

    let export = service
        .export(&ctx(), &report.report_id, "user-1")
        .await
        .expect("export");
    assert!(export.file_name.starts_with("report_inventory_"));
    assert!(export.file_name.ends_with(".csv"));
    assert!(export.content.starts_with("\"name\",\"category\",\"currentStock\""));
    assert_eq!(export.content.lines().count(), report.table_data.len() + 1);
    assert_eq!(export.log.row_count, report.table_data.len());

    let logs = service.export_logs(&ctx()).await.expect("logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].report_id, report.report_id);
}

#[tokio::test]
async fn unknown_report_and_bad_period_are_errors() {
    let service = service();
    let err = service
        .export(&ctx(), "report-missing", "user-1")
        .await
        .expect_err("missing");
    assert!(matches!(err, ReportError::NotFound));

    let err = service
        .generate(&ctx(), ReportType::Staff, "2024-03-31", "2024-03-01", "user-1")
        .await
        .expect_err("inverted");
    assert!(matches!(err, ReportError::InvalidPeriod(_)));

    let err = service
        .generate(&ctx(), ReportType::Staff, "03/01/2024", "2024-03-31", "user-1")
        .await
        .expect_err("format");
    assert!(matches!(err, ReportError::InvalidPeriod(_)));
}

#[tokio::test]
async fn reports_are_scoped_to_hotel() {
    let service = service();
    let report = service
        .generate(&ctx(), ReportType::Staff, "2024-03-01", "2024-03-31", "user-1")
        .await
        .expect("staff");
    let other = HotelContext::new("hotel-2", "user-9", vec![], vec![]);
    let err = service.get(&other, &report.report_id).await.expect_err("scoped");
    assert!(matches!(err, ReportError::NotFound));
}
