use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A sign entry ("seña"): a word plus the media demonstrating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sign {
    pub id: Uuid,
    pub category_id: Uuid,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Search hit: the sign joined with its category name.
#[derive(Debug, Clone, Serialize)]
pub struct SignWithCategory {
    #[serde(flatten)]
    pub sign: Sign,
    pub category_name: String,
}

/// Catalog search filters; both are optional and combine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignQuery {
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring match on the word.
    pub search: Option<String>,
}

/// Create/edit payload (admin). Media URLs point at already-uploaded files;
/// upload storage is the caller's concern.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpsertRequest {
    #[validate(length(min = 1, max = 100, message = "Word is required"))]
    pub word: String,

    pub category_id: Uuid,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}
