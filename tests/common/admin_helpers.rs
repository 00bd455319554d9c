use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

use crate::common::utils::{create_test_user_and_login, login, make_authenticated_request, TestApp, TestUser};

/// Register a user, promote them to admin directly in the database, and
/// log in again so the token carries the admin role.
pub async fn create_admin_user_and_login(app: &TestApp) -> TestUser {
    let mut user = create_test_user_and_login(&app.address).await;

    sqlx::query("UPDATE users SET role = 'admin' WHERE username = $1")
        .bind(&user.username)
        .execute(&app.db_pool)
        .await
        .expect("Failed to promote user to admin");

    user.token = login(&app.address, &user.username, &user.password).await;
    user
}

/// Create a season, activate it, and fill it with castaways.
/// Returns the season id and the castaway ids in creation order.
pub async fn create_active_season_with_castaways(
    client: &Client,
    app: &TestApp,
    admin: &TestUser,
    season_number: i32,
    castaway_count: usize,
) -> (String, Vec<String>) {
    let season_response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/admin/seasons", app.address),
        &admin.token,
        Some(json!({
            "number": season_number,
            "title": format!("Season {}", season_number)
        })),
    )
    .await;
    assert_eq!(201, season_response.status().as_u16());
    let season: serde_json::Value = season_response.json().await.expect("Failed to parse season");
    let season_id = season["data"]["id"].as_str().expect("Season id").to_string();

    let activate_response = make_authenticated_request(
        client,
        reqwest::Method::PUT,
        &format!("{}/admin/seasons/{}/activate", app.address, season_id),
        &admin.token,
        None,
    )
    .await;
    assert_eq!(200, activate_response.status().as_u16());

    let mut castaway_ids = Vec::with_capacity(castaway_count);
    for i in 0..castaway_count {
        let castaway_response = make_authenticated_request(
            client,
            reqwest::Method::POST,
            &format!("{}/admin/seasons/{}/castaways", app.address, season_id),
            &admin.token,
            Some(json!({
                "name": format!("Castaway {} {}", i + 1, &Uuid::new_v4().to_string()[..8]),
                "tribe": if i % 2 == 0 { "Luno" } else { "Vatu" },
                "occupation": "Firefighter"
            })),
        )
        .await;
        assert_eq!(201, castaway_response.status().as_u16());
        let castaway: serde_json::Value = castaway_response
            .json()
            .await
            .expect("Failed to parse castaway");
        castaway_ids.push(castaway["data"]["id"].as_str().expect("Castaway id").to_string());
    }

    (season_id, castaway_ids)
}

/// Create an episode airing tomorrow, with picks locking an hour before.
pub async fn create_episode(
    client: &Client,
    app: &TestApp,
    admin: &TestUser,
    season_id: &str,
    number: i32,
) -> String {
    let air_at = Utc::now() + Duration::days(1);
    let episode_response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/admin/seasons/{}/episodes", app.address, season_id),
        &admin.token,
        Some(json!({
            "number": number,
            "title": format!("Episode {}", number),
            "air_at": air_at,
            "picks_lock_at": air_at - Duration::hours(1)
        })),
    )
    .await;
    assert_eq!(201, episode_response.status().as_u16());
    let episode: serde_json::Value = episode_response.json().await.expect("Failed to parse episode");
    episode["data"]["id"].as_str().expect("Episode id").to_string()
}

pub async fn lock_episode(client: &Client, app: &TestApp, admin: &TestUser, episode_id: &str) {
    let lock_response = make_authenticated_request(
        client,
        reqwest::Method::PUT,
        &format!("{}/admin/episodes/{}/lock", app.address, episode_id),
        &admin.token,
        None,
    )
    .await;
    assert_eq!(200, lock_response.status().as_u16());
}

/// Record events and finalize the episode in one go.
pub async fn score_episode(
    client: &Client,
    app: &TestApp,
    admin: &TestUser,
    episode_id: &str,
    events: serde_json::Value,
) {
    let events_response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/admin/episodes/{}/events", app.address, episode_id),
        &admin.token,
        Some(json!({ "events": events })),
    )
    .await;
    assert_eq!(200, events_response.status().as_u16());

    let finalize_response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/admin/episodes/{}/finalize", app.address, episode_id),
        &admin.token,
        None,
    )
    .await;
    assert_eq!(200, finalize_response.status().as_u16());
}
