//! Late show API: episodes, guests and the rated appearances linking them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, ops_routes, show_routes};
pub use seed::{load_seed_file, seed_if_empty};
pub use service::ShowService;
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_database_exists};
