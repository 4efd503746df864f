use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Per-category completion percentage row (overview screen).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProgress {
    pub category_id: Uuid,
    pub name: String,
    pub percent: u8,
}

/// Where the user stands inside a category's quiz track. Upsert keyed by
/// (user, category).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizProgress {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub level: u32,
    pub question_index: u32,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveQuizProgressRequest {
    pub category_id: Uuid,

    #[validate(range(min = 1, message = "Level starts at 1"))]
    pub level: u32,

    pub question_index: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BumpProgressRequest {
    pub category_id: Uuid,

    #[validate(range(min = 1, max = 100, message = "Increment must be between 1 and 100"))]
    pub increment: u8,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddPointsRequest {
    #[validate(range(min = 1, message = "Points must be positive"))]
    pub points: i64,
}

/// One node of the home-screen progress map.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressMapEntry {
    pub category_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub locked: bool,
    pub completed: bool,
    pub level: u32,
    pub question_index: u32,
}

/// Where the "continue" button should take the user.
#[derive(Debug, Clone, Serialize)]
pub struct ResumePoint {
    pub category_id: Uuid,
    pub category_name: String,
    pub level: u32,
    /// Fraction of the current level finished, in `0.0..=1.0`.
    pub progress: f32,
}
