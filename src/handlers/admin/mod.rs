pub mod castaway_handler;
pub mod episode_handler;
pub mod scoring_handler;
pub mod season_handler;
