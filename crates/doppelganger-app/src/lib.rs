//! HTTP adapter for the doppelganger mock server: turns one [`doppelganger::config::Configuration`]
//! into a running `axum` service. Kept as a library, with `main.rs` as a
//! thin binary shell, so the adapter can be exercised directly in tests
//! without spawning a real listener.

pub mod body;
pub mod content;
pub mod server;
