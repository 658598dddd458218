pub mod asset;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod installer;
pub mod package;
pub mod platform;
pub mod provider;
pub mod runtime;
