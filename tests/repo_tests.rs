// tests/repo_tests.rs

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{seed_math_quiz, test_pool};
use quiz_master::{
    models::{
        score::Grade,
        subject::NewSubject,
        user::NewUser,
    },
    repo,
};
use sqlx::SqliteConnection;

async fn learner(conn: &mut SqliteConnection, username: &str) -> i64 {
    repo::users::insert(
        conn,
        &NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            full_name: username.to_string(),
            is_admin: false,
        },
    )
    .await
    .unwrap()
}

fn graded(total_scored: i64, total_questions: i64) -> Grade {
    Grade {
        total_scored,
        total_questions,
    }
}

#[tokio::test]
async fn seeding_the_admin_is_idempotent() {
    let pool = test_pool().await;
    let created = quiz_master::db::seed_admin(&pool, &common::test_config())
        .await
        .unwrap();
    assert!(!created);

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);
}

#[tokio::test]
async fn average_is_the_mean_of_attempt_percentages() {
    let pool = test_pool().await;
    let seeded = seed_math_quiz(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let user_id = learner(&mut conn, "alice").await;

    assert_eq!(repo::scores::average_percentage(&mut conn, user_id).await.unwrap(), 0.0);

    let now = Utc::now();
    repo::scores::insert(&mut conn, seeded.quiz_id, user_id, graded(1, 2), now)
        .await
        .unwrap();
    repo::scores::insert(&mut conn, seeded.quiz_id, user_id, graded(3, 3), now)
        .await
        .unwrap();
    // A quiz without questions counts as 0%.
    repo::scores::insert(&mut conn, seeded.quiz_id, user_id, graded(0, 0), now)
        .await
        .unwrap();

    let average = repo::scores::average_percentage(&mut conn, user_id).await.unwrap();
    assert!((average - 50.0).abs() < 1e-9, "average was {average}");
    assert_eq!(repo::scores::count_for_user(&mut conn, user_id).await.unwrap(), 3);
}

#[tokio::test]
async fn recent_scores_are_newest_first_and_limited() {
    let pool = test_pool().await;
    let seeded = seed_math_quiz(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let user_id = learner(&mut conn, "bob").await;
    let other_id = learner(&mut conn, "carol").await;

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    for minutes in 0..7 {
        repo::scores::insert(
            &mut conn,
            seeded.quiz_id,
            user_id,
            graded(minutes % 3, 2),
            start + Duration::minutes(minutes),
        )
        .await
        .unwrap();
    }
    repo::scores::insert(&mut conn, seeded.quiz_id, other_id, graded(2, 2), start)
        .await
        .unwrap();

    let recent = repo::scores::recent_for_user(&mut conn, user_id, 5).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|score| score.user_id == user_id));
    assert_eq!(recent[0].timestamp, start + Duration::minutes(6));
    assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(recent[0].subject_name, "Math");
    assert_eq!(recent[0].chapter_name, "Algebra");
    assert_eq!(recent[0].username, "bob");

    let latest = repo::scores::latest_for_quiz(&mut conn, seeded.quiz_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.timestamp, start + Duration::minutes(6));

    assert_eq!(repo::scores::list_all(&mut conn).await.unwrap().len(), 8);
    assert_eq!(repo::scores::count(&mut conn).await.unwrap(), 8);
}

#[tokio::test]
async fn quiz_counts_include_empty_subjects() {
    let pool = test_pool().await;
    let seeded = seed_math_quiz(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    repo::subjects::insert(
        &mut conn,
        &NewSubject {
            name: "Art".to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap();

    let counts = repo::subjects::list_with_quiz_counts(&mut conn).await.unwrap();
    let counts: Vec<(&str, i64)> = counts
        .iter()
        .map(|subject| (subject.name.as_str(), subject.quiz_count))
        .collect();
    assert_eq!(counts, vec![("Art", 0), ("Math", 1)]);

    let summaries = repo::quizzes::list_by_subject(&mut conn, seeded.subject_id)
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].question_count, 2);
}

#[tokio::test]
async fn duplicate_subject_is_a_unique_violation() {
    let pool = test_pool().await;
    seed_math_quiz(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let err = repo::subjects::insert(
        &mut conn,
        &NewSubject {
            name: "Math".to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(repo::is_unique_violation(&err));
}

#[tokio::test]
async fn deleting_a_chapter_cascades_to_quizzes_questions_and_scores() {
    let pool = test_pool().await;
    let seeded = seed_math_quiz(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let user_id = learner(&mut conn, "dave").await;
    repo::scores::insert(&mut conn, seeded.quiz_id, user_id, graded(1, 2), Utc::now())
        .await
        .unwrap();

    assert!(repo::chapters::delete_cascade(&mut conn, seeded.chapter_id).await.unwrap());
    assert!(!repo::chapters::delete_cascade(&mut conn, seeded.chapter_id).await.unwrap());

    assert!(repo::quizzes::find(&mut conn, seeded.quiz_id).await.unwrap().is_none());
    assert!(repo::questions::list_by_quiz(&mut conn, seeded.quiz_id).await.unwrap().is_empty());
    assert_eq!(repo::scores::count(&mut conn).await.unwrap(), 0);
    assert!(repo::subjects::find(&mut conn, seeded.subject_id).await.unwrap().is_some());
}

#[tokio::test]
async fn answer_keys_follow_the_stored_questions() {
    let pool = test_pool().await;
    let seeded = seed_math_quiz(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let keys = repo::questions::answer_keys(&mut conn, seeded.quiz_id).await.unwrap();
    let keys: Vec<(i64, i64)> = keys
        .iter()
        .map(|key| (key.question_id, key.correct_option))
        .collect();
    assert_eq!(
        keys,
        vec![(seeded.question_ids[0], 1), (seeded.question_ids[1], 2)]
    );
}

#[tokio::test]
async fn in_memory_database_is_shared_by_the_whole_pool() {
    let config = quiz_master::config::Config {
        database_max_connections: 5,
        ..common::test_config()
    };
    let pool = quiz_master::db::connect(&config).await.unwrap();
    quiz_master::db::migrate(&pool).await.unwrap();
    assert_eq!(pool.options().get_max_connections(), 1);

    quiz_master::db::seed_admin(&pool, &config).await.unwrap();
    let (first, second) = tokio::join!(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(&pool),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(&pool),
    );
    assert_eq!(first.unwrap(), 1);
    assert_eq!(second.unwrap(), 1);

    assert!(quiz_master::db::is_in_memory("sqlite::memory:"));
    assert!(quiz_master::db::is_in_memory("sqlite://file:shared?mode=memory&cache=shared"));
    assert!(!quiz_master::db::is_in_memory("sqlite://quiz_master.db"));
}
