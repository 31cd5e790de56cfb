pub mod analysis;
pub mod bands;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod schema;
pub mod traffic;
