// API routes and handlers

pub mod auth;
pub mod dashboard;
pub mod diet_plans;
pub mod events;
pub mod extractors;
pub mod gyms;
pub mod health;
pub mod routes;
pub mod users;

pub use routes::{create_routes, AppState};
