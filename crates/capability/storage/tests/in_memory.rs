use domain::HotelContext;
use hms_storage::{InMemoryUserStore, UserRecord, UserStore};

#[tokio::test]
async fn find_default_admin() {
    let store = InMemoryUserStore::with_default_admin();
    let ctx = HotelContext::default();
    let user = store
        .find_by_username(&ctx, "admin")
        .await
        .expect("query")
        .expect("admin");
    assert_eq!(user.username, "admin");
    assert_eq!(user.hotel_id, "hotel-1");
}

#[tokio::test]
async fn guest_account_only_submits_contact_requests() {
    let store = InMemoryUserStore::with_default_admin();
    let user = store
        .find_by_username(&HotelContext::default(), "guest")
        .await
        .expect("query")
        .expect("guest");
    assert_eq!(user.permissions, vec!["CONTACT.SUBMIT".to_string()]);
}

#[tokio::test]
async fn create_user_rejects_duplicate_username() {
    let store = InMemoryUserStore::with_default_admin();
    let ctx = HotelContext::default();
    let record = UserRecord {
        hotel_id: "hotel-1".to_string(),
        user_id: "user-2".to_string(),
        username: "admin".to_string(),
        password: "x".to_string(),
        roles: vec![],
        permissions: vec![],
    };
    let err = store.create_user(&ctx, record).await.expect_err("duplicate");
    assert_eq!(err.kind(), hms_storage::StorageErrorKind::Conflict);
}

#[tokio::test]
async fn refresh_jti_round_trip() {
    let store = InMemoryUserStore::with_default_admin();
    let ctx = HotelContext::new("hotel-1", "user-1", vec![], vec![]);
    assert!(store.set_refresh_jti(&ctx, "user-1", Some("jti-1")).await.expect("set"));
    assert_eq!(
        store.get_refresh_jti(&ctx, "user-1").await.expect("get"),
        Some("jti-1".to_string())
    );
    assert!(!store.set_refresh_jti(&ctx, "missing", Some("jti")).await.expect("set"));
}
