pub mod auth;
pub mod castaway;
pub mod common;
pub mod draft;
pub mod league;
pub mod pick;
pub mod scoring;
pub mod season;
pub mod stats;
pub mod user;
