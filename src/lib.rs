pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
