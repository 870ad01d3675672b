pub mod client;
pub mod config;
pub mod export;
pub mod fetch;
pub mod transform;
