use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use alokah_auth::error::AuthServiceError;
use alokah_auth::usecase::token::{
    RefreshTokenUseCase, issue_access_token, issue_refresh_token, issue_token_pair,
};
use alokah_auth_types::token::{
    RefreshClaims, validate_access_token, validate_refresh_token,
};

use crate::helpers::{MockUserRepo, email_contact, test_token_config, test_user};

// ── issue / validate ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_access_token_that_validates_successfully() {
    let config = test_token_config();
    let user_id = Uuid::new_v4();
    let token = issue_access_token(user_id, &config).unwrap();

    assert!(!token.is_empty());
    let info = validate_access_token(&token, &config.access_secret).unwrap();
    assert_eq!(info.user_id, user_id);
}

#[tokio::test]
async fn should_issue_refresh_token_with_matching_token_id() {
    let config = test_token_config();
    let user_id = Uuid::new_v4();
    let (token, token_id) = issue_refresh_token(user_id, &config).unwrap();

    let info = validate_refresh_token(&token, &config.refresh_secret).unwrap();
    assert_eq!(info.user_id, user_id);
    assert_eq!(info.token_id, token_id);
}

#[tokio::test]
async fn should_issue_distinct_token_ids_per_login() {
    let config = test_token_config();
    let user_id = Uuid::new_v4();
    let first = issue_token_pair(user_id, &config).unwrap();
    let second = issue_token_pair(user_id, &config).unwrap();
    assert_ne!(first.refresh_token_id, second.refresh_token_id);
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_exchange_refresh_token_for_new_access_token() {
    let config = test_token_config();
    let user = test_user(&email_contact());
    let pair = issue_token_pair(user.id, &config).unwrap();

    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        config: config.clone(),
    };
    let out = usecase.execute(&pair.refresh_token).await.unwrap();
    assert_eq!(out.user_id, user.id);

    let info = validate_access_token(&out.access_token, &config.access_secret).unwrap();
    assert_eq!(info.user_id, user.id);
}

#[tokio::test]
async fn should_reject_tampered_refresh_token_as_invalid() {
    let config = test_token_config();
    let user = test_user(&email_contact());
    // signed with the wrong secret → signature check fails
    let mut forged_config = test_token_config();
    forged_config.refresh_secret = "attacker-controlled".to_owned();
    let (forged, _) = issue_refresh_token(user.id, &forged_config).unwrap();

    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        config,
    };
    let result = usecase.execute(&forged).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_garbage_refresh_token_as_invalid() {
    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        config: test_token_config(),
    };
    let result = usecase.execute("not-a-valid-jwt").await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_refresh_token_as_expired() {
    let config = test_token_config();
    let user = test_user(&email_contact());
    // exp far in the past, beyond the validation leeway
    let claims = RefreshClaims {
        sub: user.id.to_string(),
        tid: Uuid::new_v4().to_string(),
        exp: 1_000_000,
    };
    let stale = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )
    .unwrap();

    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        config,
    };
    let result = usecase.execute(&stale).await;
    assert!(
        matches!(result, Err(AuthServiceError::TokenExpired)),
        "expected TokenExpired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_refresh_when_user_deleted() {
    let config = test_token_config();
    let pair = issue_token_pair(Uuid::new_v4(), &config).unwrap();

    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        config,
    };
    let result = usecase.execute(&pair.refresh_token).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidToken)));
}
