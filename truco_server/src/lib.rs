//! HTTP and WebSocket front end for the Truco game store.

pub mod api;
pub mod config;
pub mod logging;
