use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::quiz::QuizResult;
use crate::models::user::UserProfile;

/// System-wide totals for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SystemStats {
    pub total_users: u64,
    /// Users with quiz progress touched in the last 30 days.
    pub active_users: u64,
    pub users_completed_all: u64,
    pub total_categories: u64,
    pub total_signs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_streak: Option<TopStreak>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopStreak {
    pub user_id: Uuid,
    pub name: String,
    pub max_streak: u32,
}

/// Admin user listing row: account facts plus progress roll-up.
#[derive(Debug, Clone, Serialize)]
pub struct UserOverview {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub categories_completed: u64,
    pub total_categories: u64,
    /// Completed categories over total, as a percentage with one decimal.
    pub average_progress: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

/// Full per-user drill-down for the admin panel.
#[derive(Debug, Clone, Serialize)]
pub struct UserProgressDetail {
    pub user: UserProfile,
    pub categories: Vec<UserCategoryProgress>,
    pub quiz_history: Vec<QuizResult>,
    pub summary: UserProgressSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCategoryProgress {
    pub category_id: Uuid,
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub level: u32,
    pub question_index: u32,
    pub completed: bool,
    pub percent_complete: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProgressSummary {
    pub total_categories: u64,
    pub categories_completed: u64,
    /// Categories the user answered at least one question in.
    pub quizzes_played: u64,
    /// Average completion across played categories, as a percentage.
    pub average_completion: f32,
}
