pub mod draft_handler;
pub mod league_handler;
pub mod pick_handler;
pub mod ranking_handler;
pub mod standings_handler;
