// Library exports for the admin CLI
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod config;
pub mod routes;
pub mod session;
