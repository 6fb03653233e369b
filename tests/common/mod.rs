// tests/common/mod.rs

#![allow(dead_code)]

use std::net::SocketAddr;

use quiz_master::{
    config::Config,
    db,
    models::{
        chapter::NewChapter, question::NewQuestion, quiz::NewQuiz, subject::NewSubject,
    },
    repo, routes,
    state::AppState,
};
use reqwest::{Client, Response, redirect::Policy};
use sqlx::SqlitePool;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

/// Config for a private in-memory database.
/// A single connection keeps every query on the same in-memory database.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        admin_email: "admin@quizmaster.com".to_string(),
    }
}

/// Migrated and seeded pool, without a server.
pub async fn test_pool() -> SqlitePool {
    let config = test_config();
    let pool = db::connect(&config)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to migrate database");
    db::seed_admin(&pool, &config)
        .await
        .expect("Failed to seed admin");
    pool
}

/// Spawns the app on a random port and returns its address and pool.
pub async fn spawn_app() -> TestApp {
    let pool = test_pool().await;
    let state = AppState {
        pool: pool.clone(),
        config: test_config(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

/// Client that keeps cookies and does not follow redirects,
/// so tests can assert on the `Location` header.
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Response has no Location header")
        .to_str()
        .unwrap()
        .to_string()
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, client: &Client, path: &str, form: &[(&str, &str)]) -> Response {
        client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, client: &Client, username: &str, password: &str) -> Response {
        self.post_form(
            client,
            "/auth/login",
            &[("username", username), ("password", password)],
        )
        .await
    }

    pub async fn admin_client(&self) -> Client {
        let client = client();
        let response = self.login(&client, ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert_eq!(location(&response), "/admin/dashboard");
        client
    }

    /// Registers a fresh learner and returns a logged-in client with its username.
    pub async fn user_client(&self) -> (Client, String) {
        let client = client();
        let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
        let email = format!("{username}@example.com");

        let response = self
            .post_form(
                &client,
                "/auth/register",
                &[
                    ("full_name", "Test Learner"),
                    ("username", &username),
                    ("email", &email),
                    ("password", "password123"),
                ],
            )
            .await;
        assert_eq!(location(&response), "/auth/login");

        let response = self.login(&client, &username, "password123").await;
        assert_eq!(location(&response), "/user/dashboard");

        (client, username)
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar(sql)
            .fetch_one(&self.pool)
            .await
            .expect("Count query failed")
    }
}

/// Ids of the seeded "Math / Algebra" quiz.
pub struct SeededQuiz {
    pub subject_id: i64,
    pub chapter_id: i64,
    pub quiz_id: i64,
    /// Correct options are 1 and 2 respectively.
    pub question_ids: [i64; 2],
}

/// Subject "Math", chapter "Algebra", a 10 minute quiz with two questions.
pub async fn seed_math_quiz(pool: &SqlitePool) -> SeededQuiz {
    let mut conn = pool.acquire().await.unwrap();

    let subject_id = repo::subjects::insert(
        &mut conn,
        &NewSubject {
            name: "Math".to_string(),
            description: "Numbers".to_string(),
        },
    )
    .await
    .unwrap();

    let chapter_id = repo::chapters::insert(
        &mut conn,
        &NewChapter {
            subject_id,
            name: "Algebra".to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap();

    let quiz_id = repo::quizzes::insert(
        &mut conn,
        &NewQuiz {
            chapter_id,
            time_duration: 10,
            remarks: "Warm-up".to_string(),
        },
    )
    .await
    .unwrap();

    let mut question_ids = [0; 2];
    for (i, correct_option) in [1, 2].into_iter().enumerate() {
        question_ids[i] = repo::questions::insert(
            &mut conn,
            &NewQuestion {
                quiz_id,
                statement: format!("Question {}", i + 1),
                option1: "A".to_string(),
                option2: "B".to_string(),
                option3: Some("C".to_string()),
                option4: None,
                correct_option,
            },
        )
        .await
        .unwrap();
    }

    SeededQuiz {
        subject_id,
        chapter_id,
        quiz_id,
        question_ids,
    }
}
