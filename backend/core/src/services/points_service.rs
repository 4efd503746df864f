use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::progress::AddPointsRequest;
use crate::store::UserStore;

pub struct PointsService {
    users: Arc<dyn UserStore>,
}

impl PointsService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Credit points to the user and return the new total.
    pub async fn add(&self, user_id: Uuid, req: &AddPointsRequest) -> Result<i64> {
        req.validate()?;

        let total = self
            .users
            .add_points(user_id, req.points)
            .await?
            .ok_or(Error::NotFound("user"))?;

        tracing::info!(
            "Added {} points to user {} (total: {})",
            req.points,
            user_id,
            total
        );
        Ok(total)
    }

    pub async fn total(&self, user_id: Uuid) -> Result<i64> {
        self.users
            .points(user_id)
            .await?
            .ok_or(Error::NotFound("user"))
    }
}
