use reqwest::Client;
use serde_json::json;

use crate::common::utils::{make_authenticated_request, TestApp, TestUser};

/// Create a league as `owner` and return (league_id, invite_code).
pub async fn create_league(
    client: &Client,
    app: &TestApp,
    owner: &TestUser,
    name: &str,
    roster_size: i32,
) -> (String, String) {
    let response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/league/leagues", app.address),
        &owner.token,
        Some(json!({
            "name": name,
            "roster_size": roster_size
        })),
    )
    .await;
    assert_eq!(201, response.status().as_u16());
    let league: serde_json::Value = response.json().await.expect("Failed to parse league");
    (
        league["data"]["id"].as_str().expect("League id").to_string(),
        league["data"]["invite_code"]
            .as_str()
            .expect("Invite code")
            .to_string(),
    )
}

pub async fn join_league(client: &Client, app: &TestApp, user: &TestUser, invite_code: &str) {
    let response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/join", app.address),
        &user.token,
        Some(json!({ "invite_code": invite_code })),
    )
    .await;
    assert_eq!(200, response.status().as_u16());
}

pub async fn run_draft(client: &Client, app: &TestApp, owner: &TestUser, league_id: &str) {
    let response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(201, response.status().as_u16());
}

pub async fn submit_pick(
    client: &Client,
    app: &TestApp,
    user: &TestUser,
    league_id: &str,
    episode_id: &str,
    castaway_id: &str,
) -> reqwest::Response {
    make_authenticated_request(
        client,
        reqwest::Method::PUT,
        &format!(
            "{}/league/leagues/{}/picks/{}",
            app.address, league_id, episode_id
        ),
        &user.token,
        Some(json!({ "castaway_id": castaway_id })),
    )
    .await
}

/// The caller's roster castaway ids, in pick order.
pub async fn roster_castaways(
    client: &Client,
    app: &TestApp,
    user: &TestUser,
    league_id: &str,
) -> Vec<String> {
    let response = make_authenticated_request(
        client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}/rosters", app.address, league_id),
        &user.token,
        None,
    )
    .await;
    assert_eq!(200, response.status().as_u16());
    let rosters: serde_json::Value = response.json().await.expect("Failed to parse rosters");

    rosters["data"]
        .as_array()
        .expect("Roster list")
        .iter()
        .find(|member| member["user_id"].as_str() == Some(user.user_id.as_str()))
        .map(|member| {
            member["slots"]
                .as_array()
                .expect("Roster slots")
                .iter()
                .map(|slot| slot["castaway_id"].as_str().expect("Castaway id").to_string())
                .collect()
        })
        .unwrap_or_default()
}
