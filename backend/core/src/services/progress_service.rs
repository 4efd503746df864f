use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::progress::{
    BumpProgressRequest, CategoryProgress, ProgressMapEntry, QuizProgress, ResumePoint,
    SaveQuizProgressRequest,
};
use crate::store::{CategoryStore, ProgressStore};

pub struct ProgressService {
    categories: Arc<dyn CategoryStore>,
    progress: Arc<dyn ProgressStore>,
    /// Questions per level; finishing this many marks a category completed.
    questions_per_level: usize,
}

impl ProgressService {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        progress: Arc<dyn ProgressStore>,
        questions_per_level: usize,
    ) -> Self {
        Self {
            categories,
            progress,
            questions_per_level,
        }
    }

    /// Every category with the user's completion percentage, zero when
    /// untouched.
    pub async fn overview(&self, user_id: Uuid) -> Result<Vec<CategoryProgress>> {
        let categories = self.categories.categories().await?;
        let mut rows = Vec::with_capacity(categories.len());
        for category in categories {
            let percent = self
                .progress
                .category_percent(user_id, category.id)
                .await?
                .unwrap_or(0);
            rows.push(CategoryProgress {
                category_id: category.id,
                name: category.name,
                percent,
            });
        }
        Ok(rows)
    }

    /// Additive percentage update, clamped at 100.
    pub async fn bump_category(&self, user_id: Uuid, req: &BumpProgressRequest) -> Result<u8> {
        req.validate()?;

        if self.categories.category(req.category_id).await?.is_none() {
            return Err(Error::NotFound("category"));
        }

        let current = self
            .progress
            .category_percent(user_id, req.category_id)
            .await?
            .unwrap_or(0);
        let updated = current.saturating_add(req.increment).min(100);
        self.progress
            .set_category_percent(user_id, req.category_id, updated)
            .await?;

        tracing::info!(
            "Progress for user {} in category {}: {}%",
            user_id,
            req.category_id,
            updated
        );
        Ok(updated)
    }

    /// Upsert the user's position in a category quiz track. The completed
    /// flag derives from the question index reaching the level size.
    pub async fn save_quiz_progress(
        &self,
        user_id: Uuid,
        req: &SaveQuizProgressRequest,
    ) -> Result<QuizProgress> {
        req.validate()?;

        let entry = QuizProgress {
            user_id,
            category_id: req.category_id,
            level: req.level,
            question_index: req.question_index,
            completed: req.question_index as usize >= self.questions_per_level,
            updated_at: Utc::now(),
        };
        self.progress.upsert_quiz_progress(entry.clone()).await?;

        tracing::debug!(
            "Quiz progress saved: user={}, category={}, index={}, completed={}",
            user_id,
            req.category_id,
            req.question_index,
            entry.completed
        );
        Ok(entry)
    }

    /// The home-screen map: categories in order, each locked until the
    /// previous one is completed. The first is always unlocked.
    pub async fn progress_map(&self, user_id: Uuid) -> Result<Vec<ProgressMapEntry>> {
        let categories = self.categories.categories().await?;
        let mut map = Vec::with_capacity(categories.len());
        let mut previous_completed = true;

        for category in categories {
            let progress = self.progress.quiz_progress(user_id, category.id).await?;
            let completed = progress.as_ref().is_some_and(|p| p.completed);

            map.push(ProgressMapEntry {
                category_id: category.id,
                name: category.name,
                icon_url: category.icon_url,
                locked: !previous_completed,
                completed,
                level: progress.as_ref().map_or(1, |p| p.level),
                question_index: progress.as_ref().map_or(0, |p| p.question_index),
            });
            previous_completed = completed;
        }
        Ok(map)
    }

    /// The most recently played category, for the "continue" button. None
    /// when the user has not played yet.
    pub async fn resume(&self, user_id: Uuid) -> Result<Option<ResumePoint>> {
        let Some(latest) = self.progress.latest_quiz_progress(user_id).await? else {
            return Ok(None);
        };

        let category = self
            .categories
            .category(latest.category_id)
            .await?
            .ok_or(Error::NotFound("category"))?;

        let progress =
            (latest.question_index as f32 / self.questions_per_level as f32).min(1.0);
        Ok(Some(ResumePoint {
            category_id: latest.category_id,
            category_name: category.name,
            level: latest.level,
            progress,
        }))
    }
}
