use std::sync::Arc;

use domain::HotelContext;
use hms_auth::{AuthError, AuthService, JwtManager};
use hms_storage::{InMemoryUserStore, UserStore};

fn service(store: Arc<InMemoryUserStore>) -> AuthService {
    AuthService::new(store, JwtManager::new("secret".to_string(), 3600, 7200))
}

#[tokio::test]
async fn refresh_token_is_single_use_after_rotation() {
    let auth = service(Arc::new(InMemoryUserStore::with_default_admin()));

    let (_, tokens1) = auth.login("admin", "admin123").await.expect("login");
    let tokens2 = auth.refresh(&tokens1.refresh_token).await.expect("refresh");
    assert_ne!(tokens1.refresh_token, tokens2.refresh_token);

    let result = auth.refresh(&tokens1.refresh_token).await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}

#[tokio::test]
async fn login_upgrades_plaintext_password() {
    let store = Arc::new(InMemoryUserStore::with_default_admin());
    let auth = service(store.clone());
    auth.login("guest", "guest123").await.expect("login");
    let stored = store
        .find_by_username(&HotelContext::default(), "guest")
        .await
        .expect("query")
        .expect("guest");
    assert!(stored.password.starts_with("$argon2"));
    auth.login("guest", "guest123").await.expect("login again");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let auth = service(Arc::new(InMemoryUserStore::with_default_admin()));
    let result = auth.login("admin", "nope").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn register_guest_issues_guest_context() {
    let auth = service(Arc::new(InMemoryUserStore::with_default_admin()));
    let (user, tokens) = auth
        .register_guest("hotel-1", "newguest", "secret1")
        .await
        .expect("register");
    assert_eq!(user.roles, vec!["guest".to_string()]);
    let ctx = auth.verify_access_token(&tokens.access_token).expect("access");
    assert_eq!(ctx.hotel_id, "hotel-1");
    assert_eq!(ctx.permissions, vec!["CONTACT.SUBMIT".to_string()]);

    let again = auth.register_guest("hotel-1", "newguest", "secret1").await;
    assert!(matches!(again, Err(AuthError::UsernameTaken)));
}
