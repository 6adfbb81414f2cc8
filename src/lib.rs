pub mod app;
pub mod config;
pub mod cors;
pub mod handlers;
pub mod models;
pub mod server;
pub mod utils;
