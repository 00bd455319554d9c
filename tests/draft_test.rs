use std::collections::HashSet;

use serde_json::json;

mod common;

use common::admin_helpers::{create_active_season_with_castaways, create_admin_user_and_login};
use common::league_helpers::{create_league, join_league, roster_castaways};
use common::utils::{create_test_user_and_login, make_authenticated_request, spawn_app};

#[tokio::test]
async fn draft_assigns_full_unique_rosters() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let third = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Draft Night", 2).await;
    join_league(&client, &app, &second, &invite_code).await;
    join_league(&client, &app, &third, &invite_code).await;

    let draft_response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(201, draft_response.status().as_u16());
    let result: serde_json::Value = draft_response.json().await.unwrap();
    let rosters = result["data"]["rosters"].as_array().unwrap();
    assert_eq!(3, rosters.len());

    let mut all_castaways = HashSet::new();
    for roster in rosters {
        let slots = roster["slots"].as_array().unwrap();
        assert_eq!(2, slots.len());
        for slot in slots {
            assert!(all_castaways.insert(slot["castaway_id"].as_str().unwrap().to_string()));
        }
    }
    assert_eq!(6, all_castaways.len());
}

#[tokio::test]
async fn rankings_steer_the_draft() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    let (_, castaways) = create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Strategists", 2).await;
    join_league(&client, &app, &second, &invite_code).await;

    // The owner covets the castaway created last; the other member never
    // ranks, so they draft off the board in creation order and can never
    // reach the end of it first
    let favorite = castaways.last().unwrap().clone();
    let ranking_response = make_authenticated_request(
        &client,
        reqwest::Method::PUT,
        &format!("{}/league/leagues/{}/rankings", app.address, league_id),
        &owner.token,
        Some(json!({ "castaway_ids": [favorite, castaways[0]] })),
    )
    .await;
    assert_eq!(200, ranking_response.status().as_u16());

    let draft_response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(201, draft_response.status().as_u16());

    let owner_roster = roster_castaways(&client, &app, &owner, &league_id).await;
    assert!(owner_roster.contains(&favorite));
}

#[tokio::test]
async fn draft_runs_only_once() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "One Shot", 2).await;
    join_league(&client, &app, &second, &invite_code).await;

    let first = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(201, first.status().as_u16());

    let again = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(409, again.status().as_u16());
}

#[tokio::test]
async fn only_the_owner_can_run_the_draft() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Owner Only", 2).await;
    join_league(&client, &app, &second, &invite_code).await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &second.token,
        None,
    )
    .await;
    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn draft_rejects_a_single_member_league() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let (league_id, _) = create_league(&client, &app, &owner, "Lonely", 2).await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn draft_rejects_when_the_castaway_pool_is_too_small() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    // 4 castaways cannot cover 2 members at roster size 3
    create_active_season_with_castaways(&client, &app, &admin, 1, 4).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Scarce", 3).await;
    join_league(&client, &app, &second, &invite_code).await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn joining_is_closed_after_the_draft() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Closed Door", 2).await;
    join_league(&client, &app, &second, &invite_code).await;

    let draft = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(201, draft.status().as_u16());

    let latecomer = create_test_user_and_login(&app.address).await;
    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/join", app.address),
        &latecomer.token,
        Some(json!({ "invite_code": invite_code })),
    )
    .await;
    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn rankings_are_rejected_after_the_draft() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    let (_, castaways) = create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let second = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Too Late", 2).await;
    join_league(&client, &app, &second, &invite_code).await;

    let draft = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/{}/draft", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(201, draft.status().as_u16());

    let response = make_authenticated_request(
        &client,
        reqwest::Method::PUT,
        &format!("{}/league/leagues/{}/rankings", app.address, league_id),
        &owner.token,
        Some(json!({ "castaway_ids": [castaways[0]] })),
    )
    .await;
    assert_eq!(409, response.status().as_u16());
}
