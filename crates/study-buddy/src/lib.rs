pub mod activity;
pub mod config;
pub mod connections;
pub mod directory;
pub mod discovery;
pub mod error;
pub mod profile;
pub mod telemetry;
