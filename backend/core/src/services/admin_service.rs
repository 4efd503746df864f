use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::admin::{
    SystemStats, TopStreak, UserCategoryProgress, UserOverview, UserProgressDetail,
    UserProgressSummary,
};
use crate::models::category::{Category, CategoryUpsertRequest};
use crate::models::quiz::{CreateQuizRequest, ScheduledQuiz, ScheduledQuizSummary};
use crate::models::sign::{Sign, SignUpsertRequest};
use crate::services::streak_service::compute_streak;
use crate::store::{CategoryStore, ProgressStore, QuizStore, SessionStore, SignStore, UserStore};

const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Catalog management, scheduled quizzes and the dashboard read models for
/// the admin panel.
pub struct AdminService {
    users: Arc<dyn UserStore>,
    categories: Arc<dyn CategoryStore>,
    signs: Arc<dyn SignStore>,
    sessions: Arc<dyn SessionStore>,
    progress: Arc<dyn ProgressStore>,
    quizzes: Arc<dyn QuizStore>,
    /// Questions per level, shared with the progress math.
    questions_per_level: usize,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserStore>,
        categories: Arc<dyn CategoryStore>,
        signs: Arc<dyn SignStore>,
        sessions: Arc<dyn SessionStore>,
        progress: Arc<dyn ProgressStore>,
        quizzes: Arc<dyn QuizStore>,
        questions_per_level: usize,
    ) -> Self {
        Self {
            users,
            categories,
            signs,
            sessions,
            progress,
            quizzes,
            questions_per_level,
        }
    }

    pub async fn create_sign(&self, req: SignUpsertRequest) -> Result<Sign> {
        req.validate()?;

        if self.categories.category(req.category_id).await?.is_none() {
            return Err(Error::NotFound("category"));
        }

        let sign = Sign {
            id: Uuid::new_v4(),
            category_id: req.category_id,
            word: req.word,
            description: req.description,
            video_url: req.video_url,
            image_url: req.image_url,
        };
        self.signs.insert_sign(sign.clone()).await?;

        tracing::info!("Sign created: {} ({})", sign.id, sign.word);
        Ok(sign)
    }

    pub async fn update_sign(&self, id: Uuid, req: SignUpsertRequest) -> Result<Sign> {
        req.validate()?;

        if self.categories.category(req.category_id).await?.is_none() {
            return Err(Error::NotFound("category"));
        }

        let sign = Sign {
            id,
            category_id: req.category_id,
            word: req.word,
            description: req.description,
            video_url: req.video_url,
            image_url: req.image_url,
        };
        if !self.signs.update_sign(sign.clone()).await? {
            return Err(Error::NotFound("sign"));
        }
        Ok(sign)
    }

    pub async fn delete_sign(&self, id: Uuid) -> Result<()> {
        if !self.signs.delete_sign(id).await? {
            return Err(Error::NotFound("sign"));
        }
        tracing::info!("Sign deleted: {}", id);
        Ok(())
    }

    /// Create a category; without an explicit position it is appended at the
    /// end of the map.
    pub async fn create_category(&self, req: CategoryUpsertRequest) -> Result<Category> {
        req.validate()?;

        let position = match req.position {
            Some(position) => position,
            None => self
                .categories
                .categories()
                .await?
                .iter()
                .map(|c| c.position + 1)
                .max()
                .unwrap_or(0),
        };

        let category = Category {
            id: Uuid::new_v4(),
            name: req.name,
            position,
            icon_url: req.icon_url,
            description: req.description,
        };
        self.categories.insert_category(category.clone()).await?;

        tracing::info!("Category created: {} ({})", category.id, category.name);
        Ok(category)
    }

    pub async fn update_category(&self, id: Uuid, req: CategoryUpsertRequest) -> Result<Category> {
        req.validate()?;

        let existing = self
            .categories
            .category(id)
            .await?
            .ok_or(Error::NotFound("category"))?;

        let category = Category {
            id,
            name: req.name,
            position: req.position.unwrap_or(existing.position),
            icon_url: req.icon_url,
            description: req.description,
        };
        self.categories.update_category(category.clone()).await?;
        Ok(category)
    }

    /// Delete a category. Refused while signs still reference it, so the
    /// catalog never ends up with orphaned entries.
    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        let in_use = self.signs.signs_in_category_count(id).await?;
        if in_use > 0 {
            return Err(Error::Conflict(format!(
                "Category still has {} signs; delete them first",
                in_use
            )));
        }

        if !self.categories.delete_category(id).await? {
            return Err(Error::NotFound("category"));
        }
        tracing::info!("Category deleted: {}", id);
        Ok(())
    }

    /// Create an admin-authored quiz for a calendar date. Quiz and questions
    /// go through one store call so the adapter can wrap them in a
    /// transaction.
    pub async fn create_quiz(&self, req: CreateQuizRequest) -> Result<ScheduledQuiz> {
        req.validate()?;

        let quiz = ScheduledQuiz {
            id: Uuid::new_v4(),
            title: req.title,
            available_on: req.available_on,
            created_at: Utc::now(),
        };
        self.quizzes
            .insert_scheduled_quiz(quiz.clone(), req.questions)
            .await?;

        tracing::info!("Scheduled quiz created: {} ({})", quiz.id, quiz.title);
        Ok(quiz)
    }

    pub async fn list_quizzes(&self) -> Result<Vec<ScheduledQuizSummary>> {
        Ok(self.quizzes.scheduled_quizzes().await?)
    }

    pub async fn delete_quiz(&self, id: Uuid) -> Result<()> {
        if !self.quizzes.delete_scheduled_quiz(id).await? {
            return Err(Error::NotFound("quiz"));
        }
        tracing::info!("Scheduled quiz deleted: {}", id);
        Ok(())
    }

    /// Dashboard totals.
    pub async fn stats(&self) -> Result<SystemStats> {
        let total_users = self.users.user_count().await?;
        let total_categories = self.categories.category_count().await?;
        let total_signs = self.signs.sign_count().await?;

        let since = Utc::now() - Duration::days(ACTIVE_WINDOW_DAYS);
        let active_users = self.progress.active_user_count(since).await?;
        let users_completed_all = self.progress.users_completed_all(total_categories).await?;

        let top_streak = self.top_streak().await?;

        Ok(SystemStats {
            total_users,
            active_users,
            users_completed_all,
            total_categories,
            total_signs,
            top_streak,
        })
    }

    /// The user holding the longest streak ever recorded, across everyone
    /// with session history. Earlier users win ties.
    async fn top_streak(&self) -> Result<Option<TopStreak>> {
        let today = Utc::now().date_naive();
        let mut best: Option<TopStreak> = None;

        for user_id in self.sessions.session_user_ids().await? {
            let dates = self.sessions.session_dates_desc(user_id).await?;
            let summary = compute_streak(&dates, today);
            if best
                .as_ref()
                .is_none_or(|b| summary.max_streak > b.max_streak)
            {
                let Some(user) = self.users.user(user_id).await? else {
                    continue;
                };
                best = Some(TopStreak {
                    user_id,
                    name: user.name,
                    max_streak: summary.max_streak,
                });
            }
        }
        Ok(best)
    }

    /// Registered users with their progress roll-up, newest first.
    pub async fn list_users(&self) -> Result<Vec<UserOverview>> {
        let total_categories = self.categories.category_count().await?;
        let users = self.users.normal_users().await?;

        let mut rows = Vec::with_capacity(users.len());
        for user in users {
            let progress = self.progress.user_quiz_progress(user.id).await?;
            let categories_completed = progress.iter().filter(|p| p.completed).count() as u64;
            let last_activity = progress.iter().map(|p| p.updated_at).max();
            let average_progress = if total_categories > 0 {
                round_to_tenth(categories_completed as f32 / total_categories as f32 * 100.0)
            } else {
                0.0
            };

            rows.push(UserOverview {
                id: user.id,
                name: user.name,
                email: user.email,
                registered_at: user.created_at,
                categories_completed,
                total_categories,
                average_progress,
                last_activity,
            });
        }
        Ok(rows)
    }

    /// Per-category drill-down for one user: a row per category whether
    /// played or not, quiz history, and a roll-up summary.
    pub async fn user_progress(&self, user_id: Uuid) -> Result<UserProgressDetail> {
        let user = self
            .users
            .user(user_id)
            .await?
            .ok_or(Error::NotFound("user"))?;

        let categories = self.categories.categories().await?;
        let mut rows = Vec::with_capacity(categories.len());
        for category in categories {
            let progress = self.progress.quiz_progress(user_id, category.id).await?;
            let question_index = progress.as_ref().map_or(0, |p| p.question_index);
            rows.push(UserCategoryProgress {
                category_id: category.id,
                category_name: category.name,
                icon_url: category.icon_url,
                level: progress.as_ref().map_or(1, |p| p.level),
                question_index,
                completed: progress.as_ref().is_some_and(|p| p.completed),
                percent_complete: round_to_tenth(
                    question_index as f32 / self.questions_per_level as f32 * 100.0,
                ),
                last_played: progress.as_ref().map(|p| p.updated_at),
            });
        }

        let total_categories = rows.len() as u64;
        let categories_completed = rows.iter().filter(|r| r.completed).count() as u64;
        let quizzes_played = rows.iter().filter(|r| r.question_index > 0).count() as u64;
        let answered: u32 = rows.iter().map(|r| r.question_index).sum();
        let average_completion = if quizzes_played > 0 {
            round_to_tenth(
                answered as f32 / (quizzes_played as usize * self.questions_per_level) as f32
                    * 100.0,
            )
        } else {
            0.0
        };

        let quiz_history = self.quizzes.results_for_user(user_id).await?;

        tracing::debug!(
            "Progress detail for user {}: {}/{} categories completed, {} played",
            user_id,
            categories_completed,
            total_categories,
            quizzes_played
        );

        Ok(UserProgressDetail {
            user: user.into(),
            categories: rows,
            quiz_history,
            summary: UserProgressSummary {
                total_categories,
                categories_completed,
                quizzes_played,
                average_completion,
            },
        })
    }
}

/// One decimal place, matching what the dashboard renders.
fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
