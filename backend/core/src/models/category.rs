use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A learning category; signs belong to exactly one. `position` drives the
/// order of the home-screen progress map and its unlock chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/edit payload (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryUpsertRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    /// When omitted on create, the category is appended at the end.
    pub position: Option<u32>,
    pub icon_url: Option<String>,
    pub description: Option<String>,
}
