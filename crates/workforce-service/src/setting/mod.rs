//! Account self-service settings.

pub mod service;

pub use service::SettingService;
