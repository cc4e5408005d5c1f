// Application configuration

pub mod app;
pub mod provider;
pub mod seeding;
pub mod store;

pub use app::AppConfig;
pub use provider::AuthProviderConfig;
pub use seeding::DemoSeeder;
pub use store::{FirestoreConfig, StoreBackend, StoreConfig};
