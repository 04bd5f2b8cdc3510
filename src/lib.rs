//! # portal
//!
//! Leptos + WASM frontend core for an auth-gated company portal.
//!
//! The session provider in `state` owns the single source of truth for who
//! is signed in. Route guards in `components` read it through `use_session`
//! and redirect with history replacement; `net` defines the identity backend
//! seam and its hosted REST implementation.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // A second init only fails because a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
