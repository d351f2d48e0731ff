use chrono::NaiveDate;
use domain::timestamp::parse_date_text;
use domain::{BookingStatus, RoomStatus, StaffStatus};
use hms_storage::{BookingRecord, DashboardStats, InventoryItemRecord, RoomRecord, StaffRecord};

/// 入住率（百分比，四舍五入）；没有房间时为 0。
pub fn occupancy_rate(total_rooms: u64, available_rooms: u64) -> u32 {
    if total_rooms == 0 {
        return 0;
    }
    let available = available_rooms.min(total_rooms);
    let rate = (total_rooms - available) as f64 / total_rooms as f64 * 100.0;
    rate.round() as u32
}

/// 由各集合的当前记录汇总看板统计。
pub fn aggregate_dashboard(
    bookings: &[BookingRecord],
    rooms: &[RoomRecord],
    inventory: &[InventoryItemRecord],
    staff: &[StaffRecord],
    today: NaiveDate,
) -> DashboardStats {
    let count_status =
        |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count() as u64;
    let today_check_ins = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .filter(|b| {
            parse_date_text(&b.check_in_date).is_some_and(|at| at.date_naive() == today)
        })
        .count() as u64;
    let total_revenue = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .map(|b| b.total_amount)
        .sum();

    let total_rooms = rooms.len() as u64;
    let available_rooms = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Available)
        .count() as u64;
    let occupied_rooms = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Occupied)
        .count() as u64;

    DashboardStats {
        total_bookings: bookings.len() as u64,
        pending_bookings: count_status(BookingStatus::Pending),
        confirmed_bookings: count_status(BookingStatus::Confirmed),
        checked_in_bookings: count_status(BookingStatus::CheckedIn),
        cancelled_bookings: count_status(BookingStatus::Cancelled),
        today_check_ins,
        total_rooms,
        available_rooms,
        occupied_rooms,
        occupancy_rate: occupancy_rate(total_rooms, available_rooms),
        total_revenue,
        inventory_items: inventory.len() as u64,
        low_stock_items: inventory.iter().filter(|i| i.is_low_stock()).count() as u64,
        total_staff: staff.len() as u64,
        active_staff: staff
            .iter()
            .filter(|s| s.status == StaffStatus::Active)
            .count() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_rounds_to_nearest_percent() {
        assert_eq!(occupancy_rate(50, 15), 70);
        assert_eq!(occupancy_rate(3, 2), 33);
        assert_eq!(occupancy_rate(3, 1), 67);
        assert_eq!(occupancy_rate(10, 10), 0);
    }

    #[test]
    fn occupancy_handles_empty_and_inconsistent_counts() {
        assert_eq!(occupancy_rate(0, 0), 0);
        assert_eq!(occupancy_rate(0, 5), 0);
        assert_eq!(occupancy_rate(4, 9), 0);
    }
}
