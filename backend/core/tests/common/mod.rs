use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use senalearn_core::auth::CredentialHasher;
use senalearn_core::config::QuizConfig;
use senalearn_core::error::Result;
use senalearn_core::models::category::Category;
use senalearn_core::models::sign::Sign;
use senalearn_core::models::user::{Role, User};
use senalearn_core::services::Services;
use senalearn_core::store::{CategoryStore, MemoryStore, SignStore, UserStore};

/// Transparent stand-in for the host application's password hasher. The
/// "hash" embeds the password, so verification is a string compare.
pub struct FakeHasher;

impl CredentialHasher for FakeHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("fake${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(hash == format!("fake${password}"))
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub services: Services,
}

pub async fn create_test_app() -> TestApp {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let store = Arc::new(MemoryStore::new());
    let services = Services::new(store.clone(), Arc::new(FakeHasher), QuizConfig::default());

    TestApp { store, services }
}

pub async fn seed_category(store: &MemoryStore, name: &str, position: u32) -> Category {
    let category = Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        position,
        icon_url: None,
        description: None,
    };
    store
        .insert_category(category.clone())
        .await
        .expect("Failed to seed category");
    category
}

pub async fn seed_sign(store: &MemoryStore, category_id: Uuid, word: &str) -> Sign {
    let sign = Sign {
        id: Uuid::new_v4(),
        category_id,
        word: word.to_string(),
        description: None,
        video_url: Some(format!("/uploads/{word}.mp4")),
        image_url: None,
    };
    store
        .insert_sign(sign.clone())
        .await
        .expect("Failed to seed sign");
    sign
}

pub async fn seed_user(store: &MemoryStore, name: &str, email: &str) -> User {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: Some(email.to_string()),
        password_hash: None,
        provider_uid: None,
        role: Role::Normal,
        points: 0,
        created_at: Utc::now(),
    };
    store
        .insert_user(user.clone())
        .await
        .expect("Failed to seed user");
    user
}
