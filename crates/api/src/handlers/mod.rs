pub mod auth;
pub mod content;
pub mod uploads;
