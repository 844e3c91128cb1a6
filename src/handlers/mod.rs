// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod posts;

pub use health::config as health_config;
pub use posts::config as posts_config;
