use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use crate::config::QuizConfig;
use crate::error::Result;
use crate::models::quiz::{
    CompleteDailyRequest, DailyQuizStatus, Quiz, QuizQuestion, QuizResult, SubmitResultRequest,
};
use crate::models::sign::Sign;
use crate::store::{QuizStore, SignStore};

pub const DAILY_QUIZ_TITLE: &str = "Quiz of the Day";
pub const CATEGORY_QUIZ_TITLE: &str = "Category Quiz";

const DISTRACTORS_PER_QUESTION: usize = 3;
const QUESTION_PROMPT: &str = "What does this sign mean?";

/// Build a multiple-choice quiz from a pre-fetched sign sample and a pool of
/// candidate distractor words. Each question draws from a fresh copy of the
/// pool (without replacement within the question), so a small pool is
/// reusable across questions. When the pool runs dry the remaining slots are
/// padded with placeholder options, so every question carries exactly four
/// distinct options no matter how sparse the data is.
pub fn generate_quiz<R: Rng + ?Sized>(
    signs: Vec<Sign>,
    distractor_pool: &[String],
    title: &str,
    rng: &mut R,
) -> Quiz {
    let questions = signs
        .into_iter()
        .map(|sign| {
            let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTORS_PER_QUESTION);
            let mut pool: Vec<&str> = distractor_pool.iter().map(String::as_str).collect();

            while distractors.len() < DISTRACTORS_PER_QUESTION && !pool.is_empty() {
                let candidate = pool.swap_remove(rng.random_range(0..pool.len()));
                if candidate != sign.word && !distractors.iter().any(|d| d == candidate) {
                    distractors.push(candidate.to_string());
                }
            }

            // Small category: pad so the client still renders four options.
            while distractors.len() < DISTRACTORS_PER_QUESTION {
                distractors.push(format!("Extra Option {}", distractors.len() + 1));
            }

            let mut options = Vec::with_capacity(DISTRACTORS_PER_QUESTION + 1);
            options.push(sign.word.clone());
            options.extend(distractors);
            options.shuffle(rng);

            QuizQuestion {
                sign_id: sign.id,
                prompt: QUESTION_PROMPT.to_string(),
                video_url: sign.video_url,
                image_url: sign.image_url,
                correct_answer: sign.word,
                options,
            }
        })
        .collect();

    Quiz {
        id: Uuid::new_v4(),
        title: title.to_string(),
        questions,
    }
}

pub struct QuizService {
    signs: Arc<dyn SignStore>,
    quizzes: Arc<dyn QuizStore>,
    config: QuizConfig,
}

impl QuizService {
    pub fn new(signs: Arc<dyn SignStore>, quizzes: Arc<dyn QuizStore>, config: QuizConfig) -> Self {
        Self {
            signs,
            quizzes,
            config,
        }
    }

    /// "Quiz of the Day": samples across every category.
    pub async fn daily_quiz<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Quiz> {
        self.build_quiz(None, self.config.daily_size, DAILY_QUIZ_TITLE, rng)
            .await
    }

    /// Category quiz: shorter, and the distractors stay inside the category
    /// so the wrong answers remain plausible.
    pub async fn category_quiz<R: Rng + ?Sized>(
        &self,
        category_id: Uuid,
        rng: &mut R,
    ) -> Result<Quiz> {
        self.build_quiz(
            Some(category_id),
            self.config.category_size,
            CATEGORY_QUIZ_TITLE,
            rng,
        )
        .await
    }

    async fn build_quiz<R: Rng + ?Sized>(
        &self,
        category_id: Option<Uuid>,
        size: usize,
        title: &str,
        rng: &mut R,
    ) -> Result<Quiz> {
        let signs = self.signs.sample_signs(category_id, size).await?;
        if signs.is_empty() {
            tracing::warn!("No signs available for quiz (category: {:?})", category_id);
            return Ok(Quiz {
                id: Uuid::new_v4(),
                title: title.to_string(),
                questions: Vec::new(),
            });
        }

        let exclude: Vec<Uuid> = signs.iter().map(|s| s.id).collect();
        let pool = self
            .signs
            .distractor_words(&exclude, category_id, self.config.distractor_limit)
            .await?;

        let quiz = generate_quiz(signs, &pool, title, rng);
        tracing::info!(
            "Generated quiz '{}' with {} questions",
            quiz.title,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    pub async fn submit_result(&self, user_id: Uuid, req: &SubmitResultRequest) -> Result<QuizResult> {
        req.validate()?;

        let result = QuizResult {
            id: Uuid::new_v4(),
            user_id,
            quiz_id: req.quiz_id,
            score: req.score,
            created_at: Utc::now(),
        };
        self.quizzes.insert_result(result.clone()).await?;

        tracing::info!(
            "Quiz result saved: user={}, quiz={}, score={}",
            user_id,
            req.quiz_id,
            req.score
        );
        Ok(result)
    }

    /// Mark today's daily quiz as completed. Re-completing overwrites the
    /// stored score.
    pub async fn complete_daily(
        &self,
        user_id: Uuid,
        req: &CompleteDailyRequest,
    ) -> Result<DailyQuizStatus> {
        req.validate()?;

        let today = Utc::now().date_naive();
        self.quizzes
            .upsert_daily_completion(user_id, today, req.score)
            .await?;

        tracing::info!(
            "Daily quiz completed: user={}, score={}",
            user_id,
            req.score
        );
        Ok(DailyQuizStatus {
            completed: true,
            score: Some(req.score),
            date: today,
        })
    }

    pub async fn daily_status(&self, user_id: Uuid) -> Result<DailyQuizStatus> {
        let today = Utc::now().date_naive();
        let score = self.quizzes.daily_completion(user_id, today).await?;
        Ok(DailyQuizStatus {
            completed: score.is_some(),
            score,
            date: today,
        })
    }
}
