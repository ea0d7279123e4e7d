pub mod admin;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod host;
pub mod moderation;
pub mod settings;
