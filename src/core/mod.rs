//! Shared data model, configuration and collaborator interfaces

pub mod config;
pub mod locale;
pub mod models;
pub mod source;
