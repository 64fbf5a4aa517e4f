pub mod auth;
pub mod config;
pub mod domain;
pub mod http;
pub mod media;
pub mod metrics;
pub mod resource;
pub mod utils;
