//! # fovea-storage
//!
//! SQLite persistence for the Fovea annotation pipeline: a write-serialized
//! connection manager with a read pool, the PRAGMA profile, `user_version`
//! migrations, per-table query modules, and the dataset reset.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod reset;

pub use connection::DatabaseManager;
