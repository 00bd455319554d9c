pub mod draft;
pub mod scoring;
pub mod standings;
