use serde_json::json;

mod common;

use common::admin_helpers::create_admin_user_and_login;
use common::utils::{create_test_user_and_login, make_authenticated_request, spawn_app};

#[tokio::test]
async fn profile_requires_a_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/profile", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn profile_rejects_a_garbage_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/profile", app.address))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn profile_roundtrip_works() {
    let app = spawn_app().await;
    let user = create_test_user_and_login(&app.address).await;
    let client = reqwest::Client::new();

    let update_response = make_authenticated_request(
        &client,
        reqwest::Method::PUT,
        &format!("{}/profile", app.address),
        &user.token,
        Some(json!({ "display_name": "The Mastermind" })),
    )
    .await;
    assert_eq!(200, update_response.status().as_u16());

    let profile_response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/profile", app.address),
        &user.token,
        None,
    )
    .await;
    let profile: serde_json::Value = profile_response.json().await.unwrap();
    assert_eq!("The Mastermind", profile["data"]["display_name"]);
    assert_eq!(user.username, profile["data"]["username"]);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let app = spawn_app().await;
    let user = create_test_user_and_login(&app.address).await;
    let client = reqwest::Client::new();

    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/admin/seasons", app.address),
        &user.token,
        Some(json!({ "number": 1, "title": "Season 1" })),
    )
    .await;

    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn admin_routes_accept_admins() {
    let app = spawn_app().await;
    let admin = create_admin_user_and_login(&app).await;
    let client = reqwest::Client::new();

    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/admin/seasons", app.address),
        &admin.token,
        Some(json!({ "number": 1, "title": "Season 1" })),
    )
    .await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn suspended_users_cannot_use_their_token() {
    let app = spawn_app().await;
    let user = create_test_user_and_login(&app.address).await;
    let client = reqwest::Client::new();

    sqlx::query("UPDATE users SET status = 'suspended' WHERE username = $1")
        .bind(&user.username)
        .execute(&app.db_pool)
        .await
        .expect("Failed to suspend user");

    // The old token still says active; a fresh login carries the
    // suspended status and must be turned away
    let login_response = client
        .post(format!("{}/login", app.address))
        .json(&json!({
            "username": user.username,
            "password": user.password
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    let token = login_response.json::<serde_json::Value>().await.unwrap()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = client
        .get(format!("{}/profile", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());
}
