pub mod api;
pub mod booking;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
