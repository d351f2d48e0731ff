use domain::is_valid_booking_reference;
use hms_storage::demo_data;

#[test]
fn demo_booking_ids_are_valid_references() {
    let data = demo_data("hotel-1", 1_700_000_000_000);
    assert!(!data.bookings.is_empty());
    assert!(
        data.bookings
            .iter()
            .all(|booking| is_valid_booking_reference(&booking.booking_id))
    );
    assert!(data.bookings.iter().any(|booking| booking.archived));
    assert!(data.rooms.iter().all(|room| room.hotel_id == "hotel-1"));
}
