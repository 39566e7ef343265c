//! # client
//!
//! Leptos + WASM frontend for the Wayfarer travel planner.
//!
//! This crate contains the pages, layout components, auth state, form
//! validation, and the REST client for the server's auth API. The server
//! crate renders [`app::shell`] for SSR; the browser bundle calls
//! [`hydrate`] to attach to it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach the reactive app to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
