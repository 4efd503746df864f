use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use senalearn_core::auth::{Identity, IdentityVerifier};
use senalearn_core::error::{Error, Result};
use senalearn_core::models::user::{FederatedLoginRequest, LoginRequest, RegisterRequest, Role};

mod common;

fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let app = common::create_test_app().await;

    let profile = app
        .services
        .accounts
        .register(register_request("Ana", "ana@test.com", "Password123"))
        .await
        .expect("registration should succeed");

    assert_eq!(profile.name, "Ana");
    assert_eq!(profile.email.as_deref(), Some("ana@test.com"));
    assert_eq!(profile.role, Role::Normal);
    assert_eq!(profile.points, 0);

    let logged_in = app
        .services
        .accounts
        .login(login_request("ana@test.com", "Password123"))
        .await
        .expect("login should succeed");
    assert_eq!(logged_in.id, profile.id);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = common::create_test_app().await;

    app.services
        .accounts
        .register(register_request("Ana", "ana@test.com", "Password123"))
        .await
        .expect("first registration should succeed");

    let err = app
        .services
        .accounts
        .register(register_request("Other Ana", "ana@test.com", "Password456"))
        .await
        .expect_err("duplicate email must be rejected");
    assert!(matches!(err, Error::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn test_register_rejects_bad_payloads() {
    let app = common::create_test_app().await;

    let err = app
        .services
        .accounts
        .register(register_request("Ana", "not-an-email", "Password123"))
        .await
        .expect_err("invalid email must be rejected");
    assert!(matches!(err, Error::Validation(_)), "got {err:?}");

    let err = app
        .services
        .accounts
        .register(register_request("Ana", "ana@test.com", "short"))
        .await
        .expect_err("short password must be rejected");
    assert!(matches!(err, Error::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_login_with_wrong_credentials_is_unauthorized() {
    let app = common::create_test_app().await;

    app.services
        .accounts
        .register(register_request("Ana", "ana@test.com", "Password123"))
        .await
        .expect("registration should succeed");

    let err = app
        .services
        .accounts
        .login(login_request("ana@test.com", "WrongPassword"))
        .await
        .expect_err("wrong password must fail");
    assert!(matches!(err, Error::Unauthorized(_)), "got {err:?}");

    let err = app
        .services
        .accounts
        .login(login_request("nobody@test.com", "Password123"))
        .await
        .expect_err("unknown email must fail");
    assert!(matches!(err, Error::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_login_rejects_federated_account_without_password() {
    let app = common::create_test_app().await;

    app.services
        .accounts
        .federated_login(FederatedLoginRequest {
            provider_uid: "google-uid-1".to_string(),
            name: "Ana".to_string(),
            email: "ana@gmail.com".to_string(),
        })
        .await
        .expect("federated login should provision the account");

    let err = app
        .services
        .accounts
        .login(login_request("ana@gmail.com", "anything"))
        .await
        .expect_err("federated accounts have no local password");
    assert!(matches!(err, Error::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_federated_login_provisions_the_account_once() {
    let app = common::create_test_app().await;

    let request = || FederatedLoginRequest {
        provider_uid: "google-uid-7".to_string(),
        name: "Luis".to_string(),
        email: "luis@gmail.com".to_string(),
    };

    let first = app
        .services
        .accounts
        .federated_login(request())
        .await
        .expect("first federated login should provision");
    let second = app
        .services
        .accounts
        .federated_login(request())
        .await
        .expect("second federated login should reuse the account");

    assert_eq!(first.id, second.id);
    assert_eq!(second.role, Role::Normal);
}

#[tokio::test]
async fn test_guest_login_creates_a_guest_account() {
    let app = common::create_test_app().await;
    let mut rng = StdRng::seed_from_u64(21);

    let guest = app
        .services
        .accounts
        .guest_login(&mut rng)
        .await
        .expect("guest login should succeed");

    assert_eq!(guest.role, Role::Guest);
    assert!(guest.name.starts_with("Guest "), "name: {}", guest.name);
    assert!(guest.email.is_none());
}

struct StaticVerifier {
    identity: Identity,
}

impl IdentityVerifier for StaticVerifier {
    fn verify(&self, _credential: &str) -> Result<Identity> {
        Ok(self.identity.clone())
    }
}

#[tokio::test]
async fn test_identify_resolves_the_stored_user() {
    let app = common::create_test_app().await;

    let user = common::seed_user(&app.store, "Ana", "ana@test.com").await;
    let verifier = StaticVerifier {
        identity: Identity {
            user_id: user.id,
            role: Role::Normal,
        },
    };

    let resolved = app
        .services
        .accounts
        .identify(&verifier, "bearer-token")
        .await
        .expect("identify should find the user");
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_identify_with_unknown_user_is_not_found() {
    let app = common::create_test_app().await;

    let verifier = StaticVerifier {
        identity: Identity {
            user_id: Uuid::new_v4(),
            role: Role::Normal,
        },
    };

    let err = app
        .services
        .accounts
        .identify(&verifier, "bearer-token")
        .await
        .expect_err("credential for a deleted user must fail");
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}
