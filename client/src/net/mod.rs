//! Networking modules for the auth HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the REST calls and `types` defines the shared wire schema.

pub mod api;
pub mod types;
