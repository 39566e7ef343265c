//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the app chrome and auth gates while reading shared state
//! from the auth context provider.

pub mod auth_provider;
pub mod federated_button;
pub mod footer;
pub mod navbar;
pub mod protected_route;
