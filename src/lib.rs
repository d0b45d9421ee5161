// Library exports for Storyline
// This allows integration tests and the binary to share the application modules

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod messages;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
