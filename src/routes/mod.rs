use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod league;
pub mod profile;
pub mod registration;
pub mod seasons;
pub mod stats;

use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // Public season/episode reads
    cfg.service(seasons::get_active_season)
        .service(seasons::get_current_episode)
        .service(seasons::get_season_episodes)
        .service(seasons::get_season_castaways)
        .service(seasons::get_episode_scores);

    // Profile routes (require authentication)
    cfg.service(
        web::scope("/profile")
            .wrap(AuthMiddleware)
            .service(profile::get_profile)
            .service(profile::update_profile),
    );

    // League routes (require authentication)
    cfg.service(
        web::scope("/league")
            .wrap(AuthMiddleware)
            .service(league::create_league)
            .service(league::join_league)
            .service(league::get_my_leagues)
            .service(league::get_league_detail)
            .service(league::update_league)
            .service(league::submit_rankings)
            .service(league::get_my_rankings)
            .service(league::run_draft)
            .service(league::get_rosters)
            .service(league::get_my_picks)
            .service(league::submit_pick)
            .service(league::get_episode_picks)
            .service(league::get_standings),
    );

    // Stats routes (require authentication)
    cfg.service(
        web::scope("/stats")
            .wrap(AuthMiddleware)
            .service(stats::castaway_stats)
            .service(stats::user_leaderboard)
            .service(stats::pick_popularity)
            .service(stats::draft_value)
            .service(stats::spotlight),
    );

    // Admin routes (require an active admin)
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(admin::list_seasons)
            .service(admin::create_season)
            .service(admin::activate_season)
            .service(admin::create_episode)
            .service(admin::lock_episode)
            .service(admin::create_castaway)
            .service(admin::update_castaway)
            .service(admin::list_rules)
            .service(admin::create_rule)
            .service(admin::update_rule)
            .service(admin::list_events)
            .service(admin::record_events)
            .service(admin::finalize_episode),
    );
}
