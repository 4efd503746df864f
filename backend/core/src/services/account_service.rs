use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CredentialHasher, IdentityVerifier};
use crate::error::{Error, Result};
use crate::models::user::{
    FederatedLoginRequest, LoginRequest, RegisterRequest, Role, User, UserProfile,
};
use crate::store::UserStore;

pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    /// Register a new user with a local password.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserProfile> {
        req.validate()?;

        if self.users.user_by_email(&req.email).await?.is_some() {
            return Err(Error::Conflict("Email is already registered".to_string()));
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let user = User {
            id: Uuid::new_v4(),
            name: req.name,
            email: Some(req.email),
            password_hash: Some(password_hash),
            provider_uid: None,
            role: Role::Normal,
            points: 0,
            created_at: Utc::now(),
        };
        self.users.insert_user(user.clone()).await?;

        tracing::info!("User registered: {} ({})", user.id, user.name);
        Ok(user.into())
    }

    pub async fn login(&self, req: LoginRequest) -> Result<UserProfile> {
        req.validate()?;

        let user = self
            .users
            .user_by_email(&req.email)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        // Federated accounts have no local password to check.
        let Some(hash) = user.password_hash.as_deref() else {
            return Err(Error::Unauthorized(
                "Account uses federated sign-in".to_string(),
            ));
        };

        if !self.hasher.verify(&req.password, hash)? {
            tracing::warn!("Failed login attempt for {}", req.email);
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(user.into())
    }

    /// Login through an external identity provider, provisioning the account
    /// on first sight. Credential verification happened upstream.
    pub async fn federated_login(&self, req: FederatedLoginRequest) -> Result<UserProfile> {
        req.validate()?;

        if let Some(user) = self.users.user_by_provider_uid(&req.provider_uid).await? {
            return Ok(user.into());
        }

        let user = User {
            id: Uuid::new_v4(),
            name: req.name,
            email: Some(req.email),
            password_hash: None,
            provider_uid: Some(req.provider_uid),
            role: Role::Normal,
            points: 0,
            created_at: Utc::now(),
        };
        self.users.insert_user(user.clone()).await?;

        tracing::info!("Federated user provisioned: {}", user.id);
        Ok(user.into())
    }

    /// Provision a throwaway guest account so the app works without signup.
    pub async fn guest_login<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<UserProfile> {
        let user = User {
            id: Uuid::new_v4(),
            name: format!("Guest {}", rng.random_range(0..1000)),
            email: None,
            password_hash: None,
            provider_uid: None,
            role: Role::Guest,
            points: 0,
            created_at: Utc::now(),
        };
        self.users.insert_user(user.clone()).await?;

        tracing::info!("Guest session created: {}", user.id);
        Ok(user.into())
    }

    /// Resolve a bearer credential into the stored user, via the verifier
    /// capability owned by the request layer.
    pub async fn identify(
        &self,
        verifier: &dyn IdentityVerifier,
        credential: &str,
    ) -> Result<User> {
        let identity = verifier.verify(credential)?;
        self.users
            .user(identity.user_id)
            .await?
            .ok_or(Error::NotFound("user"))
    }
}
