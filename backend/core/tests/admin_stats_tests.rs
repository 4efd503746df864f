use chrono::{Days, Duration, Utc};
use uuid::Uuid;

use senalearn_core::error::Error;
use senalearn_core::models::progress::QuizProgress;
use senalearn_core::models::quiz::SubmitResultRequest;
use senalearn_core::store::{MemoryStore, ProgressStore, SessionStore};

mod common;

async fn complete_category(store: &MemoryStore, user_id: Uuid, category_id: Uuid) {
    store
        .upsert_quiz_progress(QuizProgress {
            user_id,
            category_id,
            level: 1,
            question_index: 10,
            completed: true,
            updated_at: Utc::now(),
        })
        .await
        .expect("progress should save");
}

#[tokio::test]
async fn test_stats_aggregate_the_whole_system() {
    let app = common::create_test_app().await;
    let greetings = common::seed_category(&app.store, "Greetings", 1).await;
    let animals = common::seed_category(&app.store, "Animals", 2).await;
    common::seed_sign(&app.store, greetings.id, "Hello").await;
    common::seed_sign(&app.store, greetings.id, "Goodbye").await;
    common::seed_sign(&app.store, animals.id, "Dog").await;

    let ana = common::seed_user(&app.store, "Ana", "ana@test.com").await;
    let luis = common::seed_user(&app.store, "Luis", "luis@test.com").await;

    // Ana finished everything and kept a three-day streak going.
    complete_category(&app.store, ana.id, greetings.id).await;
    complete_category(&app.store, ana.id, animals.id).await;
    let today = Utc::now().date_naive();
    for offset in 0..3 {
        app.store
            .record_session(ana.id, today - Days::new(offset))
            .await
            .expect("session should record");
    }
    app.store
        .record_session(luis.id, today)
        .await
        .expect("session should record");

    let stats = app.services.admin.stats().await.expect("stats should load");
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_categories, 2);
    assert_eq!(stats.total_signs, 3);
    assert_eq!(stats.active_users, 1);
    assert_eq!(stats.users_completed_all, 1);

    let top = stats.top_streak.expect("someone holds the top streak");
    assert_eq!(top.user_id, ana.id);
    assert_eq!(top.name, "Ana");
    assert_eq!(top.max_streak, 3);
}

#[tokio::test]
async fn test_stats_on_an_empty_system() {
    let app = common::create_test_app().await;

    let stats = app.services.admin.stats().await.expect("stats should load");
    assert_eq!(stats.total_users, 0);
    assert_eq!(stats.users_completed_all, 0);
    assert!(stats.top_streak.is_none());
}

#[tokio::test]
async fn test_user_listing_rolls_up_progress() {
    let app = common::create_test_app().await;
    let greetings = common::seed_category(&app.store, "Greetings", 1).await;
    common::seed_category(&app.store, "Animals", 2).await;

    let ana = common::seed_user(&app.store, "Ana", "ana@test.com").await;
    let luis = common::seed_user(&app.store, "Luis", "luis@test.com").await;
    complete_category(&app.store, ana.id, greetings.id).await;

    let listing = app
        .services
        .admin
        .list_users()
        .await
        .expect("listing should load");
    assert_eq!(listing.len(), 2);

    let ana_row = listing
        .iter()
        .find(|row| row.id == ana.id)
        .expect("Ana should be listed");
    assert_eq!(ana_row.categories_completed, 1);
    assert_eq!(ana_row.total_categories, 2);
    assert!((ana_row.average_progress - 50.0).abs() < f32::EPSILON);
    assert!(ana_row.last_activity.is_some());

    let luis_row = listing
        .iter()
        .find(|row| row.id == luis.id)
        .expect("Luis should be listed");
    assert_eq!(luis_row.categories_completed, 0);
    assert!(luis_row.last_activity.is_none());
}

#[tokio::test]
async fn test_user_progress_detail_covers_every_category() {
    let app = common::create_test_app().await;
    let greetings = common::seed_category(&app.store, "Greetings", 1).await;
    let animals = common::seed_category(&app.store, "Animals", 2).await;
    let ana = common::seed_user(&app.store, "Ana", "ana@test.com").await;

    app.store
        .upsert_quiz_progress(QuizProgress {
            user_id: ana.id,
            category_id: greetings.id,
            level: 1,
            question_index: 5,
            completed: false,
            updated_at: Utc::now() - Duration::hours(2),
        })
        .await
        .expect("progress should save");
    app.services
        .quizzes
        .submit_result(
            ana.id,
            &SubmitResultRequest {
                quiz_id: Uuid::new_v4(),
                score: 90,
            },
        )
        .await
        .expect("result should save");

    let detail = app
        .services
        .admin
        .user_progress(ana.id)
        .await
        .expect("detail should load");
    assert_eq!(detail.user.id, ana.id);
    assert_eq!(detail.categories.len(), 2);

    let greetings_row = detail
        .categories
        .iter()
        .find(|row| row.category_id == greetings.id)
        .expect("greetings row should exist");
    assert_eq!(greetings_row.question_index, 5);
    assert!((greetings_row.percent_complete - 50.0).abs() < f32::EPSILON);
    assert!(greetings_row.last_played.is_some());

    let animals_row = detail
        .categories
        .iter()
        .find(|row| row.category_id == animals.id)
        .expect("untouched categories still get a row");
    assert_eq!(animals_row.question_index, 0);
    assert_eq!(animals_row.level, 1);
    assert!(!animals_row.completed);
    assert!(animals_row.last_played.is_none());

    assert_eq!(detail.summary.total_categories, 2);
    assert_eq!(detail.summary.categories_completed, 0);
    assert_eq!(detail.summary.quizzes_played, 1);
    assert!((detail.summary.average_completion - 50.0).abs() < f32::EPSILON);
    assert_eq!(detail.quiz_history.len(), 1);
}

#[tokio::test]
async fn test_progress_detail_for_unknown_user_is_not_found() {
    let app = common::create_test_app().await;

    let err = app
        .services
        .admin
        .user_progress(Uuid::new_v4())
        .await
        .expect_err("unknown user must fail");
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}
