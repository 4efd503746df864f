use std::sync::Arc;

use crate::auth::CredentialHasher;
use crate::config::QuizConfig;
use crate::store::{
    CategoryStore, ProgressStore, QuizStore, SessionStore, SignStore, UserStore,
};

pub mod account_service;
pub mod admin_service;
pub mod category_service;
pub mod points_service;
pub mod progress_service;
pub mod quiz_service;
pub mod sign_service;
pub mod streak_service;

pub use account_service::AccountService;
pub use admin_service::AdminService;
pub use category_service::CategoryService;
pub use points_service::PointsService;
pub use progress_service::ProgressService;
pub use quiz_service::QuizService;
pub use sign_service::SignService;
pub use streak_service::StreakService;

/// Every service wired over one store set. The request layer builds this
/// once at startup and hands out references per request.
pub struct Services {
    pub accounts: AccountService,
    pub admin: AdminService,
    pub categories: CategoryService,
    pub points: PointsService,
    pub progress: ProgressService,
    pub quizzes: QuizService,
    pub signs: SignService,
    pub streaks: StreakService,
}

impl Services {
    pub fn new<S>(store: Arc<S>, hasher: Arc<dyn CredentialHasher>, quiz: QuizConfig) -> Self
    where
        S: UserStore
            + CategoryStore
            + SignStore
            + SessionStore
            + ProgressStore
            + QuizStore
            + 'static,
    {
        Self {
            accounts: AccountService::new(store.clone(), hasher),
            admin: AdminService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                quiz.category_size,
            ),
            categories: CategoryService::new(store.clone(), store.clone()),
            points: PointsService::new(store.clone()),
            progress: ProgressService::new(store.clone(), store.clone(), quiz.category_size),
            quizzes: QuizService::new(store.clone(), store.clone(), quiz),
            signs: SignService::new(store.clone()),
            streaks: StreakService::new(store),
        }
    }
}
