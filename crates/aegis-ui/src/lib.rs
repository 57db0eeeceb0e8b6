#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Aegis security console Web UI.
//!
//! The `core` module holds the session and authorization subsystem (credential
//! store, transport pipeline, invalidation coordinator, navigation guard) with
//! no DOM dependencies so it is tested natively. Browser bindings and the yew
//! app are compiled for `wasm32` only.

pub mod core;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

pub use crate::core::config::ClientConfig;
pub use crate::core::context::{Platform, SessionCtx};
pub use crate::core::error::{ApiError, ApiResult};
