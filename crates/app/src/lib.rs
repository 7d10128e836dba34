//! Invoicer application layer: backend gateway, screen state, readiness probe and terminal
//! rendering.

pub mod client;
pub mod config;
pub mod context;
pub mod domain;
pub mod notify;
pub mod observability;
pub mod readiness;
pub mod render;
pub mod views;

#[cfg(test)]
mod test;
