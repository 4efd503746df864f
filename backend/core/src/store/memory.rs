use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::category::Category;
use crate::models::progress::QuizProgress;
use crate::models::quiz::{CreateQuizQuestion, QuizResult, ScheduledQuiz, ScheduledQuizSummary};
use crate::models::sign::{Sign, SignQuery, SignWithCategory};
use crate::models::user::{Role, User};
use crate::store::{
    CategoryStore, ProgressStore, QuizStore, SessionStore, SignStore, StoreError, StoreResult,
    UserStore,
};

/// In-memory adapter implementing every store trait. Backs the test suite
/// and documents the semantics a relational adapter must provide (upserts
/// keyed by (user, date) and (user, category), unique emails, random
/// sampling).
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    signs: HashMap<Uuid, Sign>,
    sessions: HashMap<Uuid, BTreeSet<NaiveDate>>,
    category_percent: HashMap<(Uuid, Uuid), u8>,
    quiz_progress: HashMap<(Uuid, Uuid), QuizProgress>,
    quiz_results: Vec<QuizResult>,
    scheduled_quizzes: Vec<(ScheduledQuiz, Vec<CreateQuizQuestion>)>,
    daily_completions: HashMap<(Uuid, NaiveDate), i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(email) = &user.email {
            let taken = inner
                .users
                .values()
                .any(|u| u.email.as_deref() == Some(email.as_str()));
            if taken {
                return Err(StoreError::DuplicateKey(email.clone()));
            }
        }
        inner.users.insert(user.id, user);
        Ok(())
    }

    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn user_by_provider_uid(&self, uid: &str) -> StoreResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.provider_uid.as_deref() == Some(uid))
            .cloned())
    }

    async fn normal_users(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner
            .users
            .values()
            .filter(|u| u.role == Role::Normal)
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn user_count(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.users.len() as u64)
    }

    async fn add_points(&self, id: Uuid, delta: i64) -> StoreResult<Option<i64>> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(&id).map(|user| {
            user.points += delta;
            user.points
        }))
    }

    async fn points(&self, id: Uuid) -> StoreResult<Option<i64>> {
        Ok(self.inner.read().await.users.get(&id).map(|u| u.points))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert_category(&self, category: Category) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .categories
            .insert(category.id, category);
        Ok(())
    }

    async fn update_category(&self, category: Category) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.categories.remove(&id).is_some())
    }

    async fn category(&self, id: Uuid) -> StoreResult<Option<Category>> {
        Ok(self.inner.read().await.categories.get(&id).cloned())
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let inner = self.inner.read().await;
        let mut categories: Vec<Category> = inner.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn category_count(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.categories.len() as u64)
    }
}

#[async_trait]
impl SignStore for MemoryStore {
    async fn insert_sign(&self, sign: Sign) -> StoreResult<()> {
        self.inner.write().await.signs.insert(sign.id, sign);
        Ok(())
    }

    async fn update_sign(&self, sign: Sign) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.signs.get_mut(&sign.id) {
            Some(existing) => {
                *existing = sign;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_sign(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.signs.remove(&id).is_some())
    }

    async fn sign(&self, id: Uuid) -> StoreResult<Option<Sign>> {
        Ok(self.inner.read().await.signs.get(&id).cloned())
    }

    async fn search_signs(&self, query: &SignQuery) -> StoreResult<Vec<SignWithCategory>> {
        let inner = self.inner.read().await;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let mut hits: Vec<SignWithCategory> = inner
            .signs
            .values()
            .filter(|sign| {
                query
                    .category_id
                    .is_none_or(|category_id| sign.category_id == category_id)
            })
            .filter(|sign| {
                needle
                    .as_deref()
                    .is_none_or(|needle| sign.word.to_lowercase().contains(needle))
            })
            .map(|sign| SignWithCategory {
                category_name: inner
                    .categories
                    .get(&sign.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                sign: sign.clone(),
            })
            .collect();
        hits.sort_by(|a, b| a.sign.word.cmp(&b.sign.word));
        Ok(hits)
    }

    async fn signs_in_category(&self, category_id: Uuid) -> StoreResult<Vec<Sign>> {
        let inner = self.inner.read().await;
        let mut signs: Vec<Sign> = inner
            .signs
            .values()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect();
        signs.sort_by(|a, b| a.word.cmp(&b.word));
        Ok(signs)
    }

    async fn signs_in_category_count(&self, category_id: Uuid) -> StoreResult<u64> {
        Ok(self
            .inner
            .read()
            .await
            .signs
            .values()
            .filter(|s| s.category_id == category_id)
            .count() as u64)
    }

    async fn sign_count(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.signs.len() as u64)
    }

    async fn sample_signs(&self, category_id: Option<Uuid>, limit: usize) -> StoreResult<Vec<Sign>> {
        let inner = self.inner.read().await;
        let mut signs: Vec<Sign> = inner
            .signs
            .values()
            .filter(|s| category_id.is_none_or(|category_id| s.category_id == category_id))
            .cloned()
            .collect();
        signs.shuffle(&mut rand::rng());
        signs.truncate(limit);
        Ok(signs)
    }

    async fn distractor_words(
        &self,
        exclude: &[Uuid],
        category_id: Option<Uuid>,
        limit: usize,
    ) -> StoreResult<Vec<String>> {
        let excluded: HashSet<Uuid> = exclude.iter().copied().collect();
        let inner = self.inner.read().await;
        let mut words: Vec<String> = inner
            .signs
            .values()
            .filter(|s| !excluded.contains(&s.id))
            .filter(|s| category_id.is_none_or(|category_id| s.category_id == category_id))
            .map(|s| s.word.clone())
            .collect();
        words.shuffle(&mut rand::rng());
        words.truncate(limit);
        Ok(words)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn record_session(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .sessions
            .entry(user_id)
            .or_default()
            .insert(date);
        Ok(())
    }

    async fn session_dates_desc(&self, user_id: Uuid) -> StoreResult<Vec<NaiveDate>> {
        Ok(self
            .inner
            .read()
            .await
            .sessions
            .get(&user_id)
            .map(|dates| dates.iter().rev().copied().collect())
            .unwrap_or_default())
    }

    async fn session_user_ids(&self) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .inner
            .read()
            .await
            .sessions
            .iter()
            .filter(|(_, dates)| !dates.is_empty())
            .map(|(id, _)| *id)
            .collect())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn category_percent(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> StoreResult<Option<u8>> {
        Ok(self
            .inner
            .read()
            .await
            .category_percent
            .get(&(user_id, category_id))
            .copied())
    }

    async fn set_category_percent(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        percent: u8,
    ) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .category_percent
            .insert((user_id, category_id), percent);
        Ok(())
    }

    async fn quiz_progress(
        &self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> StoreResult<Option<QuizProgress>> {
        Ok(self
            .inner
            .read()
            .await
            .quiz_progress
            .get(&(user_id, category_id))
            .cloned())
    }

    async fn upsert_quiz_progress(&self, progress: QuizProgress) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .quiz_progress
            .insert((progress.user_id, progress.category_id), progress);
        Ok(())
    }

    async fn user_quiz_progress(&self, user_id: Uuid) -> StoreResult<Vec<QuizProgress>> {
        Ok(self
            .inner
            .read()
            .await
            .quiz_progress
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn latest_quiz_progress(&self, user_id: Uuid) -> StoreResult<Option<QuizProgress>> {
        Ok(self
            .inner
            .read()
            .await
            .quiz_progress
            .values()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.updated_at)
            .cloned())
    }

    async fn active_user_count(&self, since: DateTime<Utc>) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        let active: HashSet<Uuid> = inner
            .quiz_progress
            .values()
            .filter(|p| p.updated_at >= since)
            .map(|p| p.user_id)
            .collect();
        Ok(active.len() as u64)
    }

    async fn users_completed_all(&self, total_categories: u64) -> StoreResult<u64> {
        if total_categories == 0 {
            return Ok(0);
        }
        let inner = self.inner.read().await;
        let mut completed_per_user: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for progress in inner.quiz_progress.values().filter(|p| p.completed) {
            completed_per_user
                .entry(progress.user_id)
                .or_default()
                .insert(progress.category_id);
        }
        Ok(completed_per_user
            .values()
            .filter(|categories| categories.len() as u64 == total_categories)
            .count() as u64)
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn insert_result(&self, result: QuizResult) -> StoreResult<()> {
        self.inner.write().await.quiz_results.push(result);
        Ok(())
    }

    async fn results_for_user(&self, user_id: Uuid) -> StoreResult<Vec<QuizResult>> {
        let inner = self.inner.read().await;
        let mut results: Vec<QuizResult> = inner
            .quiz_results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    async fn insert_scheduled_quiz(
        &self,
        quiz: ScheduledQuiz,
        questions: Vec<CreateQuizQuestion>,
    ) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .scheduled_quizzes
            .push((quiz, questions));
        Ok(())
    }

    async fn scheduled_quizzes(&self) -> StoreResult<Vec<ScheduledQuizSummary>> {
        let inner = self.inner.read().await;
        let mut summaries: Vec<ScheduledQuizSummary> = inner
            .scheduled_quizzes
            .iter()
            .map(|(quiz, questions)| ScheduledQuizSummary {
                id: quiz.id,
                title: quiz.title.clone(),
                available_on: quiz.available_on,
                created_at: quiz.created_at,
                question_count: questions.len(),
            })
            .collect();
        summaries.sort_by(|a, b| b.available_on.cmp(&a.available_on));
        Ok(summaries)
    }

    async fn delete_scheduled_quiz(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.scheduled_quizzes.len();
        inner.scheduled_quizzes.retain(|(quiz, _)| quiz.id != id);
        Ok(inner.scheduled_quizzes.len() < before)
    }

    async fn upsert_daily_completion(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        score: i32,
    ) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .daily_completions
            .insert((user_id, date), score);
        Ok(())
    }

    async fn daily_completion(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<i32>> {
        Ok(self
            .inner
            .read()
            .await
            .daily_completions
            .get(&(user_id, date))
            .copied())
    }
}
