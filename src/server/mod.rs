//! HTTP server module
//!
//! This module contains the server setup, shared state, and route handlers.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
