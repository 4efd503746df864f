use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::sign::{Sign, SignQuery, SignWithCategory};
use crate::store::SignStore;

/// Catalog reads for the learner-facing screens.
pub struct SignService {
    signs: Arc<dyn SignStore>,
}

impl SignService {
    pub fn new(signs: Arc<dyn SignStore>) -> Self {
        Self { signs }
    }

    /// Browse/search the catalog, optionally inside one category.
    pub async fn search(&self, query: &SignQuery) -> Result<Vec<SignWithCategory>> {
        let hits = self.signs.search_signs(query).await?;
        tracing::debug!(
            "Sign search returned {} hits (category: {:?}, search: {:?})",
            hits.len(),
            query.category_id,
            query.search
        );
        Ok(hits)
    }

    pub async fn get(&self, id: Uuid) -> Result<Sign> {
        self.signs.sign(id).await?.ok_or(Error::NotFound("sign"))
    }
}
