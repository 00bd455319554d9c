pub mod admin;
pub mod auth_handler;
pub mod league;
pub mod profile_handler;
pub mod registration_handler;
pub mod season_handler;
pub mod stats_handler;
