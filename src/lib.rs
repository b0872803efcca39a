pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod telemetry;
