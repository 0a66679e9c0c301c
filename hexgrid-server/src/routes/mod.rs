//! HTTP route handlers

pub mod events;
pub mod sessions;
pub mod status;
