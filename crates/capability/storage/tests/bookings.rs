use domain::{BookingStatus, HotelContext};
use hms_storage::{
    BookingFilter, BookingRecord, BookingStore, BookingUpdate, InMemoryBookingStore,
    StorageErrorKind,
};

fn ctx(hotel_id: &str) -> HotelContext {
    HotelContext::new(hotel_id, "user-1", vec![], vec![])
}

fn record(booking_id: &str, guest_user_id: &str, status: BookingStatus) -> BookingRecord {
    BookingRecord {
        booking_id: booking_id.to_string(),
        hotel_id: "hotel-1".to_string(),
        guest_user_id: guest_user_id.to_string(),
        guest_name: "Guest".to_string(),
        guest_email: None,
        room_number: "101".to_string(),
        check_in_date: "2024-01-05".to_string(),
        check_out_date: "2024-01-07".to_string(),
        status,
        total_amount: 300.0,
        archived: false,
        created_at_ms: 1,
        updated_at_ms: 1,
    }
}

#[tokio::test]
async fn list_filters_by_status_and_guest() {
    let store = InMemoryBookingStore::with_bookings(vec![
        record("BK0000000000a", "guest-1", BookingStatus::Pending),
        record("BK0000000000b", "guest-2", BookingStatus::Pending),
        record("BK0000000000c", "guest-1", BookingStatus::Cancelled),
    ]);
    let filter = BookingFilter {
        status: Some(BookingStatus::Pending),
        guest_user_id: Some("guest-1".to_string()),
    };
    let list = store.list_bookings(&ctx("hotel-1"), &filter).await.expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].booking_id, "BK0000000000a");
}

#[tokio::test]
async fn other_hotel_cannot_see_bookings() {
    let store = InMemoryBookingStore::with_bookings(vec![record(
        "BK0000000000a",
        "guest-1",
        BookingStatus::Pending,
    )]);
    let found = store
        .find_booking(&ctx("hotel-2"), "BK0000000000a")
        .await
        .expect("find");
    assert!(found.is_none());
}

#[tokio::test]
async fn create_rejects_foreign_hotel_record() {
    let store = InMemoryBookingStore::new();
    let err = store
        .create_booking(&ctx("hotel-2"), record("BK0000000000a", "g", BookingStatus::Pending))
        .await
        .expect_err("mismatch");
    assert_eq!(err.to_string(), "hotel mismatch");
}

#[tokio::test]
async fn update_sets_status_and_timestamp() {
    let store = InMemoryBookingStore::with_bookings(vec![record(
        "BK0000000000a",
        "guest-1",
        BookingStatus::Pending,
    )]);
    let updated = store
        .update_booking(
            &ctx("hotel-1"),
            "BK0000000000a",
            BookingUpdate {
                status: Some(BookingStatus::Confirmed),
                updated_at_ms: 42,
                ..BookingUpdate::default()
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.updated_at_ms, 42);
}

#[tokio::test]
async fn archive_moves_booking_between_collections() {
    let store = InMemoryBookingStore::with_bookings(vec![record(
        "BK0000000000a",
        "guest-1",
        BookingStatus::Completed,
    )]);
    let ctx = ctx("hotel-1");
    let archived = store
        .archive_booking(&ctx, "BK0000000000a", 99)
        .await
        .expect("archive")
        .expect("exists");
    assert!(archived.archived);
    assert!(store.find_booking(&ctx, "BK0000000000a").await.expect("find").is_none());
    let from_archive = store
        .find_archived_booking(&ctx, "BK0000000000a")
        .await
        .expect("find")
        .expect("archived");
    assert_eq!(from_archive.updated_at_ms, 99);
    assert_eq!(store.list_archived_bookings(&ctx).await.expect("list").len(), 1);
}

#[tokio::test]
async fn archived_id_cannot_be_created_again() {
    let store = InMemoryBookingStore::new();
    let ctx = ctx("hotel-1");
    store
        .create_booking(&ctx, record("BK0000000000b", "guest-1", BookingStatus::Completed))
        .await
        .expect("create");
    store
        .archive_booking(&ctx, "BK0000000000b", 99)
        .await
        .expect("archive")
        .expect("exists");

    let err = store
        .create_booking(&ctx, record("BK0000000000b", "guest-1", BookingStatus::Pending))
        .await
        .expect_err("archived id");
    assert_eq!(err.kind(), StorageErrorKind::Conflict);
    assert!(store.find_booking(&ctx, "BK0000000000b").await.expect("find").is_none());
    assert_eq!(store.list_archived_bookings(&ctx).await.expect("list").len(), 1);
}

#[tokio::test]
async fn empty_hotel_is_rejected() {
    let store = InMemoryBookingStore::new();
    let err = store
        .list_bookings(&HotelContext::default(), &BookingFilter::default())
        .await
        .expect_err("hotel required");
    assert_eq!(err.to_string(), "hotel_id required");
}
