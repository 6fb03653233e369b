// tests/user_tests.rs

mod common;

use common::{location, seed_math_quiz, spawn_app};
use reqwest::StatusCode;

fn answer(question_id: i64, option: &str) -> (String, String) {
    (format!("question_{question_id}"), option.to_string())
}

fn as_form(pairs: &[(String, String)]) -> Vec<(&str, &str)> {
    pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

async fn scores_of(app: &common::TestApp, username: &str) -> Vec<(i64, i64)> {
    sqlx::query_as(
        r#"
        SELECT sc.total_scored, sc.total_questions
        FROM scores sc JOIN users u ON sc.user_id = u.id
        WHERE u.username = $1
        ORDER BY sc.id
        "#,
    )
    .bind(username)
    .fetch_all(&app.pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn root_redirects_to_the_user_dashboard() {
    let app = spawn_app().await;
    let response = app.get(&common::client(), "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user/dashboard");
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_input() {
    let app = spawn_app().await;
    let client = common::client();
    let (_, username) = app.user_client().await;
    let email = format!("{username}@example.com");

    let response = app
        .post_form(
            &client,
            "/auth/register",
            &[
                ("full_name", "Someone Else"),
                ("username", &username),
                ("email", "other@example.com"),
                ("password", "password123"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/auth/register");
    let body = app.get(&client, "/auth/register").await.text().await.unwrap();
    assert!(body.contains("Username or email is already registered"));

    let response = app
        .post_form(
            &client,
            "/auth/register",
            &[
                ("full_name", "Someone Else"),
                ("username", "someone_else"),
                ("email", &email),
                ("password", "password123"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/auth/register");

    let response = app
        .post_form(
            &client,
            "/auth/register",
            &[
                ("full_name", "Bad Email"),
                ("username", "bad_email"),
                ("email", "not-an-email"),
                ("password", "password123"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/auth/register");

    assert_eq!(app.count("SELECT COUNT(*) FROM users WHERE is_admin = 0").await, 1);
}

#[tokio::test]
async fn wrong_password_goes_back_to_login() {
    let app = spawn_app().await;
    let client = common::client();

    let response = app.login(&client, common::ADMIN_USERNAME, "wrong").await;
    assert_eq!(location(&response), "/auth/login");

    let body = app.get(&client, "/auth/login").await.text().await.unwrap();
    assert!(body.contains("Invalid username or password"));

    let response = app.get(&client, "/admin/dashboard").await;
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;
    let (client, _) = app.user_client().await;

    let response = app.get(&client, "/user/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_form(&client, "/auth/logout", &[]).await;
    assert_eq!(location(&response), "/auth/login");

    let response = app.get(&client, "/user/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn submitting_answers_records_scores() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (client, username) = app.user_client().await;
    let [q1, q2] = seeded.question_ids;
    let path = format!("/user/quiz/{}", seeded.quiz_id);
    let result = format!("/user/quiz/{}/result", seeded.quiz_id);

    let all_right = [answer(q1, "1"), answer(q2, "2")];
    let response = app.post_form(&client, &path, &as_form(&all_right)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), result);
    let body = app.get(&client, &result).await.text().await.unwrap();
    assert!(body.contains("Quiz completed! Your score: 2/2"));
    assert!(body.contains("100.00%"));

    let one_wrong = [answer(q1, "1"), answer(q2, "1")];
    app.post_form(&client, &path, &as_form(&one_wrong)).await;
    let body = app.get(&client, &result).await.text().await.unwrap();
    assert!(body.contains("1 / 2"));
    assert!(body.contains("50.00%"));

    assert_eq!(scores_of(&app, &username).await, vec![(2, 2), (1, 2)]);
}

#[tokio::test]
async fn missing_and_garbled_answers_count_as_wrong() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (client, username) = app.user_client().await;
    let [q1, _] = seeded.question_ids;
    let path = format!("/user/quiz/{}", seeded.quiz_id);

    let garbled = [answer(q1, "abc"), ("unrelated".to_string(), "1".to_string())];
    let response = app.post_form(&client, &path, &as_form(&garbled)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    app.post_form(&client, &path, &[]).await;

    assert_eq!(scores_of(&app, &username).await, vec![(0, 2), (0, 2)]);
}

#[tokio::test]
async fn attempt_page_hides_the_correct_answers() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (client, _) = app.user_client().await;
    let [q1, _] = seeded.question_ids;

    let response = app
        .get(&client, &format!("/user/quiz/{}", seeded.quiz_id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains(&format!("name=\"question_{q1}\"")));
    assert!(body.contains("data-duration-minutes=\"10\""));
    assert!(!body.contains("(correct)"));
    assert!(!body.contains("correct_option"));
}

#[tokio::test]
async fn unknown_quiz_and_missing_attempt_are_not_found() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (client, _) = app.user_client().await;

    let response = app.get(&client, "/user/quiz/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.post_form(&client, "/user/quiz/999", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.count("SELECT COUNT(*) FROM scores").await, 0);

    let response = app
        .get(&client, &format!("/user/quiz/{}/result", seeded.quiz_id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get(&client, "/user/subject/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_shows_zero_average_without_attempts() {
    let app = spawn_app().await;
    seed_math_quiz(&app.pool).await;
    let (client, _) = app.user_client().await;

    let response = app.get(&client, "/user/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("0.00%"));
    assert!(body.contains("No attempts yet."));
    assert!(body.contains("Math"));
    assert!(body.contains("1 quizzes"));
}

#[tokio::test]
async fn dashboard_averages_attempt_percentages() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (client, _) = app.user_client().await;
    let [q1, q2] = seeded.question_ids;
    let path = format!("/user/quiz/{}", seeded.quiz_id);

    app.post_form(&client, &path, &as_form(&[answer(q1, "1"), answer(q2, "2")]))
        .await;
    app.post_form(&client, &path, &as_form(&[answer(q1, "1")]))
        .await;

    let body = app.get(&client, "/user/dashboard").await.text().await.unwrap();
    assert!(body.contains("75.00%"));

    let body = app.get(&client, "/user/scores").await.text().await.unwrap();
    assert!(body.contains("2/2"));
    assert!(body.contains("1/2"));
    assert!(body.contains("Algebra"));
}

#[tokio::test]
async fn subject_page_lists_chapters_and_quizzes() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (client, _) = app.user_client().await;

    let response = app
        .get(&client, &format!("/user/subject/{}", seeded.subject_id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Algebra"));
    assert!(body.contains(&format!("/user/quiz/{}", seeded.quiz_id)));
    assert!(body.contains("2 questions, 10 min"));
}

#[tokio::test]
async fn each_learner_only_sees_their_own_attempts() {
    let app = spawn_app().await;
    let seeded = seed_math_quiz(&app.pool).await;
    let (alice, _) = app.user_client().await;
    let (bob, _) = app.user_client().await;
    let [q1, q2] = seeded.question_ids;

    app.post_form(
        &alice,
        &format!("/user/quiz/{}", seeded.quiz_id),
        &as_form(&[answer(q1, "1"), answer(q2, "2")]),
    )
    .await;

    let response = app
        .get(&bob, &format!("/user/quiz/{}/result", seeded.quiz_id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = app.get(&bob, "/user/scores").await.text().await.unwrap();
    assert!(body.contains("No attempts yet."));
}
