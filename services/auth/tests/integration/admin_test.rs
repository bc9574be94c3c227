use chrono::{Duration, Utc};

use alokah_auth::crypto;
use alokah_auth::domain::types::{ASSOCIATE_ID_LEN, Contact, SECRET_TTL_DAYS, SecretKind, User};
use alokah_auth::error::AuthServiceError;
use alokah_auth::usecase::admin::{
    AddSecretInput, AddSecretUseCase, RegisterAdminInput, RegisterAdminUseCase,
};
use alokah_auth::usecase::cooldown::Cooldown;
use alokah_auth_types::role::UserRole;

use crate::helpers::{
    MockMailer, MockOtpRepo, MockSecretRepo, MockUserRepo, auth_secret, test_token_config,
};

fn register_usecase(
    users: MockUserRepo,
    secrets: MockSecretRepo,
    cooldown_secs: i64,
) -> RegisterAdminUseCase<MockUserRepo, MockOtpRepo, MockSecretRepo, MockMailer> {
    RegisterAdminUseCase {
        users,
        otps: MockOtpRepo::empty(),
        secrets,
        mailer: MockMailer::delivering(),
        cooldown: Cooldown::from_secs(cooldown_secs),
        tokens: test_token_config(),
    }
}

fn register_input() -> RegisterAdminInput {
    RegisterAdminInput {
        email: "admin@alokah.app".to_owned(),
        secret: "registration-secret".to_owned(),
    }
}

// ── AddSecretUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_hashed_secret_with_sixty_day_expiry() {
    let usecase = AddSecretUseCase {
        secrets: MockSecretRepo::empty(),
    };
    let before = Utc::now();
    let stored = usecase
        .execute(AddSecretInput {
            secret: "registration-secret".to_owned(),
            kind: SecretKind::Auth,
        })
        .await
        .unwrap();

    assert!(crypto::verify_secret(
        "registration-secret",
        &stored.secret_hash
    ));
    assert!(stored.expires_at >= before + Duration::days(SECRET_TTL_DAYS));
    assert!(stored.expires_at <= Utc::now() + Duration::days(SECRET_TTL_DAYS));
    assert_eq!(usecase.secrets.rows.lock().unwrap().len(), 1);
}

// ── RegisterAdminUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_new_admin_with_associate_id() {
    let usecase = register_usecase(
        MockUserRepo::empty(),
        MockSecretRepo::new(vec![auth_secret("registration-secret")]),
        5,
    );
    let out = usecase.execute(register_input()).await.unwrap();

    assert!(out.created);
    assert!(!out.token.is_empty());
    assert_eq!(out.user.role, UserRole::SuperAdmin);
    let associate_id = out.user.associate_id.as_deref().unwrap();
    assert_eq!(associate_id.len(), ASSOCIATE_ID_LEN);
    assert!(associate_id.chars().all(|c| c.is_ascii_digit()));
    // a verification OTP went out to the new admin
    assert_eq!(usecase.mailer.sent.lock().unwrap().len(), 1);
    assert_eq!(usecase.otps.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_rate_limit_immediate_resend_for_existing_admin() {
    let usecase = register_usecase(
        MockUserRepo::empty(),
        MockSecretRepo::new(vec![auth_secret("registration-secret")]),
        5,
    );
    let first = usecase.execute(register_input()).await.unwrap();
    assert!(first.created);

    // inside the 5s registration window the resend is rate limited
    let second = usecase.execute(register_input()).await;
    assert!(matches!(second, Err(AuthServiceError::RateLimited { .. })));
    assert_eq!(usecase.users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_resend_for_existing_admin_after_cooldown() {
    // zero-width window models an elapsed cooldown without sleeping
    let usecase = register_usecase(
        MockUserRepo::empty(),
        MockSecretRepo::new(vec![auth_secret("registration-secret")]),
        0,
    );
    usecase.execute(register_input()).await.unwrap();
    let second = usecase.execute(register_input()).await.unwrap();

    assert!(!second.created);
    assert_eq!(usecase.users.users.lock().unwrap().len(), 1);
    assert_eq!(usecase.otps.rows.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_wrong_registration_secret() {
    let usecase = register_usecase(
        MockUserRepo::empty(),
        MockSecretRepo::new(vec![auth_secret("registration-secret")]),
        5,
    );
    let result = usecase
        .execute(RegisterAdminInput {
            email: "admin@alokah.app".to_owned(),
            secret: "guessed-secret".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::InvalidSecret)));
    assert!(usecase.users.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_when_no_secret_is_stored() {
    let usecase = register_usecase(MockUserRepo::empty(), MockSecretRepo::empty(), 5);
    let result = usecase.execute(register_input()).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidSecret)));
}

#[tokio::test]
async fn should_reject_expired_registration_secret() {
    let mut stale = auth_secret("registration-secret");
    stale.expires_at = Utc::now() - Duration::days(1);
    let usecase = register_usecase(MockUserRepo::empty(), MockSecretRepo::new(vec![stale]), 5);
    let result = usecase.execute(register_input()).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidSecret)));
}

#[tokio::test]
async fn should_skip_taken_associate_ids() {
    let taken = User {
        associate_id: Some("0042".to_owned()),
        ..User::provision(
            &Contact::Email("existing@alokah.app".to_owned()),
            UserRole::SuperAdmin,
            Utc::now(),
        )
    };
    let usecase = register_usecase(
        MockUserRepo::new(vec![taken]),
        MockSecretRepo::new(vec![auth_secret("registration-secret")]),
        5,
    );
    let out = usecase.execute(register_input()).await.unwrap();
    assert_ne!(out.user.associate_id.as_deref(), Some("0042"));
}
