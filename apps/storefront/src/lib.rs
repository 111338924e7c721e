//! Storefront bootstrap
//!
//! Loads configuration, picks the storage backend once and wires it into the
//! user and product services. Transport adapters consume [`state::AppState`].

pub mod config;
pub mod state;
