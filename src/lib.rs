//! Turnstile - login/session HTTP server
//!
//! Core library: wire decoding and encoding, sessions, users and routing.

pub mod app;
pub mod config;
pub mod http;
pub mod resources;
pub mod router;
pub mod server;
pub mod session;
pub mod user;

pub use app::App;
