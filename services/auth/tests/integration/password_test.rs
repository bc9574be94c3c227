use alokah_auth::crypto;
use alokah_auth::error::AuthServiceError;
use alokah_auth::usecase::password::{
    ChangePasswordUseCase, SetPasswordUseCase, SignInWithPasswordInput, SignInWithPasswordUseCase,
};
use alokah_auth_types::token::validate_access_token;

use crate::helpers::{
    MockUserRepo, active_user, email_contact, password_user, test_token_config, test_user,
};

// ── SetPasswordUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_set_password_and_flip_login_mode() {
    let user = active_user(&email_contact());
    let id = user.id;
    let usecase = SetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
    };
    usecase.execute(id, "hunter2-but-longer").await.unwrap();

    let users = usecase.users.users.lock().unwrap();
    assert!(users[0].is_password_login);
    let stored = users[0].password_hash.as_deref().unwrap();
    assert!(crypto::verify_secret("hunter2-but-longer", stored));
}

#[tokio::test]
async fn should_reject_set_password_for_inactive_user() {
    let user = test_user(&email_contact());
    let id = user.id;
    let usecase = SetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
    };
    let result = usecase.execute(id, "irrelevant").await;
    assert!(matches!(result, Err(AuthServiceError::UserInactive)));
}

#[tokio::test]
async fn should_reject_second_set_password() {
    let user = password_user(&email_contact(), "original");
    let id = user.id;
    let usecase = SetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
    };
    let result = usecase.execute(id, "replacement").await;
    assert!(matches!(result, Err(AuthServiceError::PasswordAlreadySet)));
}

// ── SignInWithPasswordUseCase ────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_with_correct_password() {
    let user = password_user(&email_contact(), "correct-horse");
    let config = test_token_config();
    let usecase = SignInWithPasswordUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        config: config.clone(),
    };
    let out = usecase
        .execute(SignInWithPasswordInput {
            contact: email_contact(),
            password: "correct-horse".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(out.user.id, user.id);

    let info = validate_access_token(&out.tokens.access_token, &config.access_secret).unwrap();
    assert_eq!(info.user_id, user.id);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let usecase = SignInWithPasswordUseCase {
        users: MockUserRepo::new(vec![password_user(&email_contact(), "correct-horse")]),
        config: test_token_config(),
    };
    let result = usecase
        .execute(SignInWithPasswordInput {
            contact: email_contact(),
            password: "battery-staple".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::InvalidPassword)));
}

#[tokio::test]
async fn should_reject_sign_in_without_password_set() {
    let usecase = SignInWithPasswordUseCase {
        users: MockUserRepo::new(vec![active_user(&email_contact())]),
        config: test_token_config(),
    };
    let result = usecase
        .execute(SignInWithPasswordInput {
            contact: email_contact(),
            password: "anything".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::PasswordNotSet)));
}

#[tokio::test]
async fn should_reject_sign_in_for_unknown_contact() {
    let usecase = SignInWithPasswordUseCase {
        users: MockUserRepo::empty(),
        config: test_token_config(),
    };
    let result = usecase
        .execute(SignInWithPasswordInput {
            contact: email_contact(),
            password: "anything".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::UserNotFound)));
}

// ── ChangePasswordUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_change_password_after_verifying_old() {
    let user = password_user(&email_contact(), "old-password");
    let id = user.id;
    let usecase = ChangePasswordUseCase {
        users: MockUserRepo::new(vec![user]),
    };
    usecase
        .execute(id, "old-password", "new-password")
        .await
        .unwrap();

    let users = usecase.users.users.lock().unwrap();
    let stored = users[0].password_hash.as_deref().unwrap();
    assert!(crypto::verify_secret("new-password", stored));
    assert!(!crypto::verify_secret("old-password", stored));
}

#[tokio::test]
async fn should_reject_change_with_wrong_old_password() {
    let user = password_user(&email_contact(), "old-password");
    let id = user.id;
    let usecase = ChangePasswordUseCase {
        users: MockUserRepo::new(vec![user]),
    };
    let result = usecase.execute(id, "not-the-old-one", "new-password").await;
    assert!(matches!(result, Err(AuthServiceError::InvalidPassword)));
}

#[tokio::test]
async fn should_forbid_change_for_otp_only_account() {
    let user = active_user(&email_contact());
    let id = user.id;
    let usecase = ChangePasswordUseCase {
        users: MockUserRepo::new(vec![user]),
    };
    let result = usecase.execute(id, "whatever", "new-password").await;
    assert!(matches!(result, Err(AuthServiceError::Forbidden)));
}
