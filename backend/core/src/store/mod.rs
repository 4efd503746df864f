use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::category::Category;
use crate::models::progress::QuizProgress;
use crate::models::quiz::{CreateQuizQuestion, QuizResult, ScheduledQuiz, ScheduledQuizSummary};
use crate::models::sign::{Sign, SignQuery, SignWithCategory};
use crate::models::user::User;

pub mod memory;

pub use memory::MemoryStore;

/// Failure inside a storage adapter. Services surface these unchanged; the
/// request layer decides how to report upstream failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: User) -> StoreResult<()>;
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn user_by_provider_uid(&self, uid: &str) -> StoreResult<Option<User>>;
    /// Registered (non-guest, non-admin) users, newest first.
    async fn normal_users(&self) -> StoreResult<Vec<User>>;
    async fn user_count(&self) -> StoreResult<u64>;
    /// Atomic points delta; returns the new total, or None for unknown users.
    async fn add_points(&self, id: Uuid, delta: i64) -> StoreResult<Option<i64>>;
    async fn points(&self, id: Uuid) -> StoreResult<Option<i64>>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert_category(&self, category: Category) -> StoreResult<()>;
    /// Returns false when the id is unknown.
    async fn update_category(&self, category: Category) -> StoreResult<bool>;
    async fn delete_category(&self, id: Uuid) -> StoreResult<bool>;
    async fn category(&self, id: Uuid) -> StoreResult<Option<Category>>;
    /// All categories in map order (position, then name).
    async fn categories(&self) -> StoreResult<Vec<Category>>;
    async fn category_count(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait SignStore: Send + Sync {
    async fn insert_sign(&self, sign: Sign) -> StoreResult<()>;
    async fn update_sign(&self, sign: Sign) -> StoreResult<bool>;
    async fn delete_sign(&self, id: Uuid) -> StoreResult<bool>;
    async fn sign(&self, id: Uuid) -> StoreResult<Option<Sign>>;
    async fn search_signs(&self, query: &SignQuery) -> StoreResult<Vec<SignWithCategory>>;
    async fn signs_in_category(&self, category_id: Uuid) -> StoreResult<Vec<Sign>>;
    async fn signs_in_category_count(&self, category_id: Uuid) -> StoreResult<u64>;
    async fn sign_count(&self) -> StoreResult<u64>;
    /// Uniform random sample of up to `limit` signs (the relational
    /// adapter's ORDER BY RAND() LIMIT).
    async fn sample_signs(&self, category_id: Option<Uuid>, limit: usize) -> StoreResult<Vec<Sign>>;
    /// Random pool of candidate distractor words, excluding the given sign
    /// ids and optionally restricted to one category.
    async fn distractor_words(
        &self,
        exclude: &[Uuid],
        category_id: Option<Uuid>,
        limit: usize,
    ) -> StoreResult<Vec<String>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upsert keyed by (user, date); recording the same day twice is a no-op.
    async fn record_session(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<()>;
    /// Deduplicated session dates, most recent first.
    async fn session_dates_desc(&self, user_id: Uuid) -> StoreResult<Vec<NaiveDate>>;
    /// Every user with at least one recorded session.
    async fn session_user_ids(&self) -> StoreResult<Vec<Uuid>>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn category_percent(&self, user_id: Uuid, category_id: Uuid)
        -> StoreResult<Option<u8>>;
    async fn set_category_percent(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        percent: u8,
    ) -> StoreResult<()>;
    async fn quiz_progress(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> StoreResult<Option<QuizProgress>>;
    async fn upsert_quiz_progress(&self, progress: QuizProgress) -> StoreResult<()>;
    async fn user_quiz_progress(&self, user_id: Uuid) -> StoreResult<Vec<QuizProgress>>;
    /// The most recently updated quiz progress row for the user.
    async fn latest_quiz_progress(&self, user_id: Uuid) -> StoreResult<Option<QuizProgress>>;
    /// Distinct users with quiz progress updated at or after `since`.
    async fn active_user_count(&self, since: DateTime<Utc>) -> StoreResult<u64>;
    /// Users whose completed categories cover every category.
    async fn users_completed_all(&self, total_categories: u64) -> StoreResult<u64>;
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn insert_result(&self, result: QuizResult) -> StoreResult<()>;
    /// A user's past results, newest first.
    async fn results_for_user(&self, user_id: Uuid) -> StoreResult<Vec<QuizResult>>;
    /// Quiz plus all its questions in one call so adapters can wrap it in a
    /// transaction.
    async fn insert_scheduled_quiz(
        &self,
        quiz: ScheduledQuiz,
        questions: Vec<CreateQuizQuestion>,
    ) -> StoreResult<()>;
    async fn scheduled_quizzes(&self) -> StoreResult<Vec<ScheduledQuizSummary>>;
    async fn delete_scheduled_quiz(&self, id: Uuid) -> StoreResult<bool>;
    /// Upsert keyed by (user, date); re-completing overwrites the score.
    async fn upsert_daily_completion(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        score: i32,
    ) -> StoreResult<()>;
    async fn daily_completion(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<i32>>;
}
