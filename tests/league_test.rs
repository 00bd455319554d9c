use serde_json::json;

mod common;

use common::admin_helpers::{create_active_season_with_castaways, create_admin_user_and_login};
use common::league_helpers::{create_league, join_league};
use common::utils::{create_test_user_and_login, make_authenticated_request, spawn_app};

#[tokio::test]
async fn create_league_requires_an_active_season() {
    let app = spawn_app().await;
    let user = create_test_user_and_login(&app.address).await;
    let client = reqwest::Client::new();

    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues", app.address),
        &user.token,
        Some(json!({ "name": "No Season League" })),
    )
    .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn create_league_makes_the_creator_a_member() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Tribal Council", 2).await;
    assert_eq!(8, invite_code.len());

    let detail_response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(200, detail_response.status().as_u16());
    let detail: serde_json::Value = detail_response.json().await.unwrap();
    let members = detail["data"]["members"].as_array().unwrap();
    assert_eq!(1, members.len());
    assert_eq!(owner.user_id, members[0]["user_id"]);
    assert_eq!(true, members[0]["is_owner"]);
}

#[tokio::test]
async fn join_league_by_invite_code_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let joiner = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Jury Villa", 2).await;

    join_league(&client, &app, &joiner, &invite_code).await;

    let detail_response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}", app.address, league_id),
        &joiner.token,
        None,
    )
    .await;
    let detail: serde_json::Value = detail_response.json().await.unwrap();
    assert_eq!(2, detail["data"]["members"].as_array().unwrap().len());
}

#[tokio::test]
async fn join_league_rejects_unknown_code_and_double_join() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let (_league_id, invite_code) = create_league(&client, &app, &owner, "Merge Feast", 2).await;

    let unknown = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/join", app.address),
        &owner.token,
        Some(json!({ "invite_code": "WRONGCOD" })),
    )
    .await;
    assert_eq!(404, unknown.status().as_u16());

    // The owner is already a member
    let double = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/join", app.address),
        &owner.token,
        Some(json!({ "invite_code": invite_code })),
    )
    .await;
    assert_eq!(409, double.status().as_u16());
}

#[tokio::test]
async fn join_league_rejects_when_full() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let response = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues", app.address),
        &owner.token,
        Some(json!({ "name": "Tiny League", "max_members": 2 })),
    )
    .await;
    assert_eq!(201, response.status().as_u16());
    let league: serde_json::Value = response.json().await.unwrap();
    let invite_code = league["data"]["invite_code"].as_str().unwrap();

    let second = create_test_user_and_login(&app.address).await;
    join_league(&client, &app, &second, invite_code).await;

    let third = create_test_user_and_login(&app.address).await;
    let full = make_authenticated_request(
        &client,
        reqwest::Method::POST,
        &format!("{}/league/leagues/join", app.address),
        &third.token,
        Some(json!({ "invite_code": invite_code })),
    )
    .await;
    assert_eq!(409, full.status().as_u16());
}

#[tokio::test]
async fn league_detail_is_members_only() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let outsider = create_test_user_and_login(&app.address).await;
    let (league_id, _) = create_league(&client, &app, &owner, "Secret Alliance", 2).await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}", app.address, league_id),
        &outsider.token,
        None,
    )
    .await;
    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn my_leagues_lists_memberships_with_counts() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let joiner = create_test_user_and_login(&app.address).await;
    let (_, code_a) = create_league(&client, &app, &owner, "League A", 2).await;
    create_league(&client, &app, &owner, "League B", 2).await;
    join_league(&client, &app, &joiner, &code_a).await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/mine", app.address),
        &joiner.token,
        None,
    )
    .await;
    let leagues: serde_json::Value = response.json().await.unwrap();
    let list = leagues["data"].as_array().unwrap();
    assert_eq!(1, list.len());
    assert_eq!("League A", list[0]["league"]["name"]);
    assert_eq!(2, list[0]["member_count"]);

    let owner_response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/mine", app.address),
        &owner.token,
        None,
    )
    .await;
    let owner_leagues: serde_json::Value = owner_response.json().await.unwrap();
    assert_eq!(2, owner_leagues["data"].as_array().unwrap().len());
}

#[tokio::test]
async fn only_the_owner_can_update_the_league() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 6).await;

    let owner = create_test_user_and_login(&app.address).await;
    let joiner = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Old Name", 2).await;
    join_league(&client, &app, &joiner, &invite_code).await;

    let forbidden = make_authenticated_request(
        &client,
        reqwest::Method::PUT,
        &format!("{}/league/leagues/{}", app.address, league_id),
        &joiner.token,
        Some(json!({ "name": "Hijacked" })),
    )
    .await;
    assert_eq!(403, forbidden.status().as_u16());

    let allowed = make_authenticated_request(
        &client,
        reqwest::Method::PUT,
        &format!("{}/league/leagues/{}", app.address, league_id),
        &owner.token,
        Some(json!({ "name": "New Name" })),
    )
    .await;
    assert_eq!(200, allowed.status().as_u16());
}
