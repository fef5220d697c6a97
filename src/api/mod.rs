pub mod activity;
pub mod analytics;
pub mod auth;
pub mod disasters;
pub mod evacuation;
pub mod extract;
pub mod healthcare;
pub mod sos;
pub mod user_data;
pub mod weather;
