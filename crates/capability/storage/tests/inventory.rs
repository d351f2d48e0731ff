use domain::{HotelContext, InventoryActivityKind};
use hms_storage::{
    InMemoryInventoryStore, InMemoryRoomStore, InventoryActivityRecord, InventoryItemRecord,
    InventoryStore, RoomRecord, RoomStore, StorageErrorKind,
};

fn ctx() -> HotelContext {
    HotelContext::new("hotel-1", "user-1", vec![], vec![])
}

fn item(stock: i64) -> InventoryItemRecord {
    InventoryItemRecord {
        item_id: "item-1".to_string(),
        hotel_id: "hotel-1".to_string(),
        name: "Towels".to_string(),
        category: "Linen".to_string(),
        current_stock: stock,
        reorder_level: 5,
        unit_price: 2.0,
        supplier: None,
        unit: None,
        location: None,
        image: None,
    }
}

#[tokio::test]
async fn adjust_stock_applies_delta() {
    let store = InMemoryInventoryStore::with_items(vec![item(10)]);
    let updated = store
        .adjust_stock(&ctx(), "item-1", -7)
        .await
        .expect("adjust")
        .expect("exists");
    assert_eq!(updated.current_stock, 3);
    assert!(updated.is_low_stock());
}

#[tokio::test]
async fn adjust_stock_rejects_negative_result() {
    let store = InMemoryInventoryStore::with_items(vec![item(2)]);
    let err = store
        .adjust_stock(&ctx(), "item-1", -3)
        .await
        .expect_err("insufficient");
    assert_eq!(err.kind(), StorageErrorKind::Invalid);
    let unchanged = store.find_item(&ctx(), "item-1").await.expect("find").expect("item");
    assert_eq!(unchanged.current_stock, 2);
}

#[tokio::test]
async fn activities_are_listed_newest_first() {
    let store = InMemoryInventoryStore::with_items(vec![item(2)]);
    for (index, at_ms) in [10_i64, 30, 20].into_iter().enumerate() {
        store
            .record_activity(
                &ctx(),
                InventoryActivityRecord {
                    activity_id: format!("act-{index}"),
                    hotel_id: "hotel-1".to_string(),
                    item_id: "item-1".to_string(),
                    item_name: "Towels".to_string(),
                    kind: InventoryActivityKind::Restocked,
                    quantity_delta: 1,
                    stock_after: 3,
                    actor_id: "user-1".to_string(),
                    at_ms,
                },
            )
            .await
            .expect("record");
    }
    let list = store.list_activities(&ctx(), 2).await.expect("list");
    let times: Vec<i64> = list.iter().map(|item| item.at_ms).collect();
    assert_eq!(times, vec![30, 20]);
}

#[tokio::test]
async fn duplicate_room_number_conflicts() {
    let store = InMemoryRoomStore::new();
    let room = |room_id: &str| RoomRecord {
        room_id: room_id.to_string(),
        hotel_id: "hotel-1".to_string(),
        room_number: "101".to_string(),
        room_type: "standard".to_string(),
        floor: 1,
        price_per_night: 100.0,
        status: domain::RoomStatus::Available,
    };
    store.create_room(&ctx(), room("room-a")).await.expect("create");
    let err = store.create_room(&ctx(), room("room-b")).await.expect_err("duplicate");
    assert_eq!(err.kind(), StorageErrorKind::Conflict);
}
