pub mod combinatorics;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod loader;
pub mod models;
pub mod probability;

pub use rusqlite;
