pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
