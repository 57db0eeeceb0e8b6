//! Browser bindings for the core session services (fetch, storage, location, timers, toasts).

pub mod http;
pub mod navigator;
pub mod notify;
pub mod storage;
pub mod timers;
