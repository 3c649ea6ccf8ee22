// Settings service
// Loads and saves config.toml

pub mod mapper;
pub mod service;

pub use mapper::API_URL_ENV;
pub use service::SettingsService;
