use std::net::TcpListener;

use once_cell::sync::Lazy;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use rgfl_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use rgfl_backend::run;
use rgfl_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub struct TestUser {
    pub user_id: String,
    pub username: String,
    pub password: String,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);

    let server = run(listener, connection_pool.clone(), jwt_settings).expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub async fn create_test_user_and_login(app_address: &str) -> TestUser {
    let client = Client::new();
    let username = format!("user{}", &Uuid::new_v4().to_string()[..8]);
    let password = "password123".to_string();
    let email = format!("{}@example.com", username);

    let register_response = client
        .post(format!("{}/register_user", app_address))
        .json(&json!({
            "username": username,
            "password": password,
            "email": email
        }))
        .send()
        .await
        .expect("Failed to register user.");
    assert!(register_response.status().is_success());

    let token = login(app_address, &username, &password).await;

    // The profile endpoint tells us the generated user id
    let profile_response = client
        .get(format!("{}/profile", app_address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch profile.");
    let profile: serde_json::Value = profile_response
        .json()
        .await
        .expect("Failed to parse profile response");
    let user_id = profile["data"]["id"]
        .as_str()
        .expect("No user id in profile")
        .to_string();

    TestUser {
        user_id,
        username,
        password,
        token,
    }
}

pub async fn login(app_address: &str, username: &str, password: &str) -> String {
    let client = Client::new();
    let login_response = client
        .post(format!("{}/login", app_address))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute login request.");

    let login_response: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse login response");
    login_response["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

pub async fn make_authenticated_request(
    client: &Client,
    method: reqwest::Method,
    url: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> reqwest::Response {
    let mut request = client.request(method, url).bearer_auth(token);
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}
