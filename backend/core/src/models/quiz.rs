use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A generated multiple-choice quiz.
#[derive(Debug, Clone, Serialize)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub sign_id: Uuid,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub correct_answer: String,
    /// Exactly four distinct options in display order, one of which equals
    /// `correct_answer`.
    pub options: Vec<String>,
}

/// A finished quiz run persisted for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitResultRequest {
    pub quiz_id: Uuid,

    #[validate(range(min = 0, message = "Score must be non-negative"))]
    pub score: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompleteDailyRequest {
    #[validate(range(min = 0, message = "Score must be non-negative"))]
    pub score: i32,
}

/// Daily-quiz completion state for one user and day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyQuizStatus {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    pub date: NaiveDate,
}

/// An admin-authored quiz scheduled for a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledQuiz {
    pub id: Uuid,
    pub title: String,
    pub available_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledQuizSummary {
    pub id: Uuid,
    pub title: String,
    pub available_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub available_on: NaiveDate,

    #[validate(length(min = 1, message = "A quiz needs at least one question"), nested)]
    pub questions: Vec<CreateQuizQuestion>,
}

/// One authored question row: the correct option plus three wrong ones, as
/// the admin UI captures them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizQuestion {
    #[validate(length(min = 1, message = "Prompt is required"))]
    pub prompt: String,

    pub video_url: Option<String>,

    #[validate(length(min = 1, message = "Correct option is required"))]
    pub correct_option: String,

    #[validate(length(min = 1, message = "Wrong options are required"))]
    pub wrong_option_1: String,

    #[validate(length(min = 1, message = "Wrong options are required"))]
    pub wrong_option_2: String,

    #[validate(length(min = 1, message = "Wrong options are required"))]
    pub wrong_option_3: String,
}
