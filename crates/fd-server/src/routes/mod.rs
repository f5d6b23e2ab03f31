//! Route handlers for the HTTP API.

pub mod admin;
pub mod audio;
pub mod health;
pub mod images;
pub mod videos;
