pub mod defaults;

mod expiry_config;

pub use expiry_config::ExpiryConfig;
