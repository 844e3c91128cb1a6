// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod pool;
pub mod repository;
pub mod rows;

pub use pool::Database;
pub use repository::*;
