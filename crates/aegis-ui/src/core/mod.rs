//! Core, DOM-free session and authorization primitives for the Web UI.
pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod routes;
pub mod session;
pub mod storage;
pub mod transport;
