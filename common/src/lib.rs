pub mod config;
pub mod error;
pub mod hosts;
pub mod network;
