pub mod config;
pub mod game;
pub mod notify;
pub mod stats;
pub mod types;
