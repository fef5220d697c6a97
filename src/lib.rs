pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod disasters;
pub mod entities;
pub mod error;
pub mod evacuation;
pub mod events;
pub mod healthcare;
pub mod kv;
pub mod metrics;
pub mod migrator;
pub mod seed;
pub mod sos;
pub mod telemetry;
pub mod weather;

pub use sea_orm;
