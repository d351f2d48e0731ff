//! 内存存储演示数据
//!
//! 日期相对于 `now_ms` 生成，保证看板与周营收在演示时有数据。
//! guest 账户（user-guest）拥有其中两条预订，其中一条已归档。

use crate::in_memory::user::DEFAULT_GUEST_ID;
use crate::models::{
    BookingRecord, EmergencyContact, InventoryItemRecord, PaymentRecord, PurchaseOrderRecord,
    RoomRecord, StaffRecord,
};
use chrono::{DateTime, Duration, Utc};
use domain::permissions::default_permissions;
use domain::{
    BookingStatus, PaymentMethod, PaymentStatus, PurchaseOrderStatus, RoomStatus, StaffRole,
    StaffStatus,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// 演示数据集合。
pub struct DemoData {
    pub bookings: Vec<BookingRecord>,
    pub rooms: Vec<RoomRecord>,
    pub inventory: Vec<InventoryItemRecord>,
    pub staff: Vec<StaffRecord>,
    pub payments: Vec<PaymentRecord>,
    pub purchase_orders: Vec<PurchaseOrderRecord>,
}

fn date_offset(now: DateTime<Utc>, days: i64) -> String {
    (now + Duration::days(days)).format("%Y-%m-%d").to_string()
}

#[allow(clippy::too_many_arguments)]
fn booking(
    hotel_id: &str,
    now: DateTime<Utc>,
    booking_id: &str,
    guest: (&str, &str),
    room_number: &str,
    check_in_offset: i64,
    nights: i64,
    status: BookingStatus,
    total_amount: f64,
) -> BookingRecord {
    let created_at_ms = now.timestamp_millis() + (check_in_offset - 3) * DAY_MS;
    BookingRecord {
        booking_id: booking_id.to_string(),
        hotel_id: hotel_id.to_string(),
        guest_user_id: guest.0.to_string(),
        guest_name: guest.1.to_string(),
        guest_email: Some(format!(
            "{}@example.com",
            guest.1.to_ascii_lowercase().replace(' ', ".")
        )),
        room_number: room_number.to_string(),
        check_in_date: date_offset(now, check_in_offset),
        check_out_date: date_offset(now, check_in_offset + nights),
        status,
        total_amount,
        archived: false,
        created_at_ms,
        updated_at_ms: created_at_ms,
    }
}

fn room(hotel_id: &str, number: &str, room_type: &str, price: f64, status: RoomStatus) -> RoomRecord {
    let floor = number
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as i32)
        .unwrap_or(1);
    RoomRecord {
        room_id: format!("room-{number}"),
        hotel_id: hotel_id.to_string(),
        room_number: number.to_string(),
        room_type: room_type.to_string(),
        floor,
        price_per_night: price,
        status,
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    hotel_id: &str,
    item_id: &str,
    name: &str,
    category: &str,
    stock: i64,
    reorder_level: i64,
    unit_price: f64,
    unit: &str,
) -> InventoryItemRecord {
    InventoryItemRecord {
        item_id: item_id.to_string(),
        hotel_id: hotel_id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        current_stock: stock,
        reorder_level,
        unit_price,
        supplier: Some("Harbor Supply Co.".to_string()),
        unit: Some(unit.to_string()),
        location: Some("Store room A".to_string()),
        image: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn staff_member(
    hotel_id: &str,
    staff_id: &str,
    name: &str,
    role: StaffRole,
    department: &str,
    position: &str,
    status: StaffStatus,
    salary: f64,
) -> StaffRecord {
    StaffRecord {
        staff_id: staff_id.to_string(),
        hotel_id: hotel_id.to_string(),
        name: name.to_string(),
        email: format!("{}@hotel.example.com", name.to_ascii_lowercase().replace(' ', ".")),
        phone: Some("+1-555-0100".to_string()),
        role,
        department: department.to_string(),
        position: position.to_string(),
        status,
        permissions: default_permissions(role)
            .iter()
            .map(|code| (*code).to_string())
            .collect(),
        salary,
        emergency_contact: Some(EmergencyContact {
            name: "Emergency Desk".to_string(),
            phone: "+1-555-0199".to_string(),
            relationship: None,
        }),
        hired_at: Some("2023-03-01".to_string()),
    }
}

/// 生成指定酒店的演示数据。
pub fn demo_data(hotel_id: &str, now_ms: i64) -> DemoData {
    let now = DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or_default();
    let guest = (DEFAULT_GUEST_ID, "Grace Guest");

    let mut archived = booking(
        hotel_id,
        now,
        "BK1761629662783i7bw7dtsz",
        guest,
        "103",
        -20,
        2,
        BookingStatus::Completed,
        360.0,
    );
    archived.archived = true;

    let bookings = vec![
        booking(hotel_id, now, "BK1761629700001a1b2c3d4e", guest, "101", 0, 3, BookingStatus::Confirmed, 450.0),
        booking(hotel_id, now, "BK1761629700002f5g6h7i8j", ("user-walkin-1", "Alan Park"), "102", -2, 4, BookingStatus::CheckedIn, 620.0),
        booking(hotel_id, now, "BK1761629700003k9l0m1n2o", ("user-walkin-2", "Maria Lopez"), "201", -9, 2, BookingStatus::Completed, 380.0),
        booking(hotel_id, now, "BK1761629700004p3q4r5s6t", ("user-walkin-3", "Ken Ito"), "202", -16, 1, BookingStatus::Cancelled, 210.0),
        booking(hotel_id, now, "BK1761629700005u7v8w9x0y", ("user-walkin-4", "Sara Kim"), "301", 5, 2, BookingStatus::Pending, 520.0),
        archived,
    ];

    let rooms = vec![
        room(hotel_id, "101", "standard", 150.0, RoomStatus::Occupied),
        room(hotel_id, "102", "standard", 155.0, RoomStatus::Occupied),
        room(hotel_id, "103", "standard", 150.0, RoomStatus::Available),
        room(hotel_id, "201", "deluxe", 190.0, RoomStatus::Cleaning),
        room(hotel_id, "202", "deluxe", 210.0, RoomStatus::Available),
        room(hotel_id, "301", "suite", 260.0, RoomStatus::Maintenance),
    ];

    let inventory = vec![
        item(hotel_id, "item-towels", "Bath Towels", "Linen", 120, 40, 6.5, "pcs"),
        item(hotel_id, "item-sheets", "Bed Sheets", "Linen", 30, 40, 18.0, "pcs"),
        item(hotel_id, "item-soap", "Soap Bars", "Toiletries", 0, 100, 0.8, "pcs"),
        item(hotel_id, "item-coffee", "Coffee Beans", "Kitchen", 25, 10, 14.0, "kg"),
    ];

    let staff = vec![
        staff_member(hotel_id, "staff-1", "Olivia Chen", StaffRole::Manager, "Front Office", "General Manager", StaffStatus::Active, 6000.0),
        staff_member(hotel_id, "staff-2", "Ben Carter", StaffRole::Receptionist, "Front Office", "Receptionist", StaffStatus::Active, 2800.0),
        staff_member(hotel_id, "staff-3", "Nina Patel", StaffRole::Housekeeping, "Housekeeping", "Room Attendant", StaffStatus::OnLeave, 2400.0),
        staff_member(hotel_id, "staff-4", "Leo Rossi", StaffRole::Chef, "Kitchen", "Head Chef", StaffStatus::Active, 4200.0),
    ];

    let payments = vec![
        PaymentRecord {
            payment_id: "pay-1".to_string(),
            hotel_id: hotel_id.to_string(),
            guest_name: "Maria Lopez".to_string(),
            room_number: "201".to_string(),
            amount: 380.0,
            payment_method: PaymentMethod::Card,
            status: PaymentStatus::Completed,
            transaction_at_ms: now_ms - 7 * DAY_MS,
            reference: "TXN-0001".to_string(),
            description: Some("Room charge".to_string()),
        },
        PaymentRecord {
            payment_id: "pay-2".to_string(),
            hotel_id: hotel_id.to_string(),
            guest_name: "Alan Park".to_string(),
            room_number: "102".to_string(),
            amount: 310.0,
            payment_method: PaymentMethod::Cash,
            status: PaymentStatus::Pending,
            transaction_at_ms: now_ms - DAY_MS,
            reference: "TXN-0002".to_string(),
            description: Some("Deposit".to_string()),
        },
        PaymentRecord {
            payment_id: "pay-3".to_string(),
            hotel_id: hotel_id.to_string(),
            guest_name: "Ken Ito".to_string(),
            room_number: "202".to_string(),
            amount: 210.0,
            payment_method: PaymentMethod::Digital,
            status: PaymentStatus::Refunded,
            transaction_at_ms: now_ms - 15 * DAY_MS,
            reference: "TXN-0003".to_string(),
            description: None,
        },
    ];

    let purchase_orders = vec![
        PurchaseOrderRecord {
            order_id: "po-1".to_string(),
            hotel_id: hotel_id.to_string(),
            supplier: "Harbor Supply Co.".to_string(),
            description: Some("Linen restock".to_string()),
            total_amount: 840.0,
            status: PurchaseOrderStatus::Received,
            ordered_at_ms: now_ms - 12 * DAY_MS,
        },
        PurchaseOrderRecord {
            order_id: "po-2".to_string(),
            hotel_id: hotel_id.to_string(),
            supplier: "Bean Roasters".to_string(),
            description: Some("Coffee, monthly".to_string()),
            total_amount: 280.0,
            status: PurchaseOrderStatus::Approved,
            ordered_at_ms: now_ms - 3 * DAY_MS,
        },
    ];

    DemoData {
        bookings,
        rooms,
        inventory,
        staff,
        payments,
        purchase_orders,
    }
}
