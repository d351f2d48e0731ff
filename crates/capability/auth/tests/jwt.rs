use domain::HotelContext;
use hms_auth::{AuthError, JwtManager};

fn ctx() -> HotelContext {
    HotelContext::new(
        "hotel-1",
        "user-1",
        vec!["admin".to_string()],
        vec!["BOOKING.READ".to_string()],
    )
}

#[test]
fn jwt_issue_and_decode() {
    let jwt = JwtManager::new("secret".to_string(), 3600, 7200);
    let tokens = jwt.issue_tokens(&ctx()).expect("tokens");
    let access_ctx = jwt.decode_access(&tokens.access_token).expect("access");
    let refresh_ctx = jwt.decode_refresh(&tokens.refresh_token).expect("refresh");

    assert_eq!(access_ctx.hotel_id, "hotel-1");
    assert_eq!(access_ctx.permissions, vec!["BOOKING.READ".to_string()]);
    assert_eq!(refresh_ctx.user_id, "user-1");
}

#[test]
fn access_and_refresh_tokens_are_not_interchangeable() {
    let jwt = JwtManager::new("secret".to_string(), 3600, 7200);
    let tokens = jwt.issue_tokens(&ctx()).expect("tokens");
    assert!(matches!(
        jwt.decode_access(&tokens.refresh_token),
        Err(AuthError::TokenInvalid)
    ));
    assert!(matches!(
        jwt.decode_refresh(&tokens.access_token),
        Err(AuthError::TokenInvalid)
    ));
}

#[test]
fn token_signed_with_other_secret_is_invalid() {
    let issuer = JwtManager::new("secret-a".to_string(), 3600, 7200);
    let verifier = JwtManager::new("secret-b".to_string(), 3600, 7200);
    let tokens = issuer.issue_tokens(&ctx()).expect("tokens");
    assert!(matches!(
        verifier.decode_access(&tokens.access_token),
        Err(AuthError::TokenInvalid)
    ));
}
