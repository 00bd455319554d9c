use serde_json::json;

mod common;

use common::admin_helpers::{
    create_active_season_with_castaways, create_admin_user_and_login, create_episode,
    lock_episode, score_episode,
};
use common::league_helpers::{create_league, join_league, roster_castaways, run_draft, submit_pick};
use common::utils::{create_test_user_and_login, make_authenticated_request, spawn_app};

#[tokio::test]
async fn standings_sum_picked_starter_scores() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    let (season_id, _) = create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let rival = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Standings", 2).await;
    join_league(&client, &app, &rival, &invite_code).await;
    run_draft(&client, &app, &owner, &league_id).await;

    let owner_roster = roster_castaways(&client, &app, &owner, &league_id).await;
    let rival_roster = roster_castaways(&client, &app, &rival, &league_id).await;

    // Episode 1: owner's starter wins immunity (5), rival's wins a reward (2)
    let episode_one = create_episode(&client, &app, &admin, &season_id, 1).await;
    submit_pick(&client, &app, &owner, &league_id, &episode_one, &owner_roster[0]).await;
    submit_pick(&client, &app, &rival, &league_id, &episode_one, &rival_roster[0]).await;
    lock_episode(&client, &app, &admin, &episode_one).await;
    score_episode(
        &client,
        &app,
        &admin,
        &episode_one,
        json!([
            { "castaway_id": owner_roster[0], "rule_code": "immunity_individual" },
            { "castaway_id": rival_roster[0], "rule_code": "reward_won" }
        ]),
    )
    .await;

    // Episode 2: only the owner picks; their starter finds an idol (4)
    let episode_two = create_episode(&client, &app, &admin, &season_id, 2).await;
    submit_pick(&client, &app, &owner, &league_id, &episode_two, &owner_roster[0]).await;
    lock_episode(&client, &app, &admin, &episode_two).await;
    score_episode(
        &client,
        &app,
        &admin,
        &episode_two,
        json!([{ "castaway_id": owner_roster[0], "rule_code": "idol_found" }]),
    )
    .await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}/standings", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    assert_eq!(200, response.status().as_u16());
    let standings: serde_json::Value = response.json().await.unwrap();
    let rows = standings["data"]["standings"].as_array().unwrap();
    assert_eq!(2, rows.len());
    assert_eq!(2, standings["data"]["scored_episodes"]);

    // Owner leads 9 (5 + 4) to 2
    assert_eq!(owner.user_id, rows[0]["user_id"]);
    assert_eq!(9, rows[0]["total_points"]);
    assert_eq!(1, rows[0]["position"]);
    assert_eq!(2, rows[0]["episode_points"].as_array().unwrap().len());

    assert_eq!(rival.user_id, rows[1]["user_id"]);
    assert_eq!(2, rows[1]["total_points"]);
    assert_eq!(2, rows[1]["position"]);
    assert_eq!(1, rows[1]["episode_points"].as_array().unwrap().len());

    // The member totals add up to exactly what the picked starters scored
    let member_sum: i64 = rows.iter().map(|r| r["total_points"].as_i64().unwrap()).sum();
    assert_eq!(11, member_sum);
}

#[tokio::test]
async fn tied_members_share_a_position() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    let (season_id, _) = create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let rival = create_test_user_and_login(&app.address).await;
    let (league_id, invite_code) = create_league(&client, &app, &owner, "Dead Heat", 2).await;
    join_league(&client, &app, &rival, &invite_code).await;
    run_draft(&client, &app, &owner, &league_id).await;

    let owner_roster = roster_castaways(&client, &app, &owner, &league_id).await;
    let rival_roster = roster_castaways(&client, &app, &rival, &league_id).await;

    let episode = create_episode(&client, &app, &admin, &season_id, 1).await;
    submit_pick(&client, &app, &owner, &league_id, &episode, &owner_roster[0]).await;
    submit_pick(&client, &app, &rival, &league_id, &episode, &rival_roster[0]).await;
    lock_episode(&client, &app, &admin, &episode).await;
    score_episode(
        &client,
        &app,
        &admin,
        &episode,
        json!([
            { "castaway_id": owner_roster[0], "rule_code": "reward_won" },
            { "castaway_id": rival_roster[0], "rule_code": "reward_won" }
        ]),
    )
    .await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}/standings", app.address, league_id),
        &owner.token,
        None,
    )
    .await;
    let standings: serde_json::Value = response.json().await.unwrap();
    let rows = standings["data"]["standings"].as_array().unwrap();
    assert_eq!(1, rows[0]["position"]);
    assert_eq!(1, rows[1]["position"]);
}

#[tokio::test]
async fn standings_are_members_only() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = create_admin_user_and_login(&app).await;
    create_active_season_with_castaways(&client, &app, &admin, 1, 8).await;

    let owner = create_test_user_and_login(&app.address).await;
    let outsider = create_test_user_and_login(&app.address).await;
    let (league_id, _) = create_league(&client, &app, &owner, "Private", 2).await;

    let response = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/league/leagues/{}/standings", app.address, league_id),
        &outsider.token,
        None,
    )
    .await;
    assert_eq!(403, response.status().as_u16());
}
