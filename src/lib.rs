pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod validation;

#[cfg(test)]
pub mod testing;
