pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod merge;
pub mod metadata;
pub mod models;
pub mod picks;
pub mod ranking;
pub mod scheduler;
pub mod search;
pub mod session;
pub mod trending;
pub mod utils;
