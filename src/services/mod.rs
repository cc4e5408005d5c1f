// Business logic services

pub mod dashboard_service;
pub mod diet_plan_service;
pub mod error;
pub mod event_service;
pub mod gym_service;
mod records;
pub mod user_service;

pub use dashboard_service::DashboardService;
pub use diet_plan_service::DietPlanService;
pub use error::ServiceError;
pub use event_service::{categorize_events, EventService};
pub use gym_service::{AssociatedGyms, GymService, GymTransactions};
pub use user_service::UserService;
