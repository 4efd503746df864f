#![allow(dead_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use services::quiz_service::generate_quiz;
pub use services::streak_service::compute_streak;
pub use services::Services;
