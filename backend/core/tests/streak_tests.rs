use chrono::{Days, Utc};
use uuid::Uuid;

use senalearn_core::store::SessionStore;

mod common;

#[tokio::test]
async fn test_recording_the_same_day_twice_keeps_one_row() {
    let app = common::create_test_app().await;
    let user = common::seed_user(&app.store, "Ana", "ana@test.com").await;

    app.services
        .streaks
        .record_session(user.id)
        .await
        .expect("first record should succeed");
    app.services
        .streaks
        .record_session(user.id)
        .await
        .expect("second record should be a no-op");

    let dates = app
        .store
        .session_dates_desc(user.id)
        .await
        .expect("dates should load");
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0], Utc::now().date_naive());
}

#[tokio::test]
async fn test_consecutive_days_build_the_current_streak() {
    let app = common::create_test_app().await;
    let user = common::seed_user(&app.store, "Ana", "ana@test.com").await;

    let today = Utc::now().date_naive();
    for offset in 0..3 {
        app.store
            .record_session(user.id, today - Days::new(offset))
            .await
            .expect("session should record");
    }

    let summary = app
        .services
        .streaks
        .current(user.id)
        .await
        .expect("streak should compute");
    assert_eq!(summary.current_streak, 3);
    assert_eq!(summary.max_streak, 3);
    assert_eq!(summary.last_session, Some(today));
}

#[tokio::test]
async fn test_stale_history_resets_current_but_keeps_max() {
    let app = common::create_test_app().await;
    let user = common::seed_user(&app.store, "Ana", "ana@test.com").await;

    let today = Utc::now().date_naive();
    app.store
        .record_session(user.id, today - Days::new(5))
        .await
        .expect("session should record");
    app.store
        .record_session(user.id, today - Days::new(6))
        .await
        .expect("session should record");

    let summary = app
        .services
        .streaks
        .current(user.id)
        .await
        .expect("streak should compute");
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.max_streak, 2);
    assert_eq!(summary.last_session, Some(today - Days::new(5)));
}

#[tokio::test]
async fn test_user_without_sessions_has_no_streak() {
    let app = common::create_test_app().await;

    let summary = app
        .services
        .streaks
        .current(Uuid::new_v4())
        .await
        .expect("empty history is not an error");
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.max_streak, 0);
    assert_eq!(summary.last_session, None);
}

#[tokio::test]
async fn test_session_dates_come_back_descending() {
    let app = common::create_test_app().await;
    let user = common::seed_user(&app.store, "Ana", "ana@test.com").await;

    let today = Utc::now().date_naive();
    // Inserted out of order; the store contract sorts them.
    for offset in [3u64, 0, 7, 1] {
        app.store
            .record_session(user.id, today - Days::new(offset))
            .await
            .expect("session should record");
    }

    let dates = app
        .store
        .session_dates_desc(user.id)
        .await
        .expect("dates should load");
    let expected: Vec<_> = [0u64, 1, 3, 7]
        .iter()
        .map(|&offset| today - Days::new(offset))
        .collect();
    assert_eq!(dates, expected);
}
