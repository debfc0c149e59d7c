pub mod authentication;
pub mod browser;
pub mod configuration;
pub mod flows;
pub mod telemetry;
