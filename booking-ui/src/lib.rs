pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod platform;
pub mod terminal;
pub mod views;

pub use app::Session;
pub use config::AppConfig;
