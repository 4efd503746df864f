use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::category::Category;
use crate::models::sign::Sign;
use crate::store::{CategoryStore, SignStore};

pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    signs: Arc<dyn SignStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>, signs: Arc<dyn SignStore>) -> Self {
        Self { categories, signs }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.categories.categories().await?)
    }

    /// The category's signs, in the role of lessons of a course.
    pub async fn lessons(&self, category_id: Uuid) -> Result<Vec<Sign>> {
        if self.categories.category(category_id).await?.is_none() {
            return Err(Error::NotFound("category"));
        }
        Ok(self.signs.signs_in_category(category_id).await?)
    }
}
