//! POEditor clients and the session runner

pub mod client;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod runner;
