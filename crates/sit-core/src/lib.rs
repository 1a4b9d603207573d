pub mod config;
pub mod error;
pub mod logging;

pub mod activation;
pub mod bridge;
pub mod host;
pub mod navigation;
pub mod rules;
pub mod sanitizer;
