pub mod admin;
pub mod commands;
pub mod documents;
pub mod fixtures;
pub mod handler;
pub mod queries;
pub mod render;
