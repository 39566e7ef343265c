//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the identity-call sequencing and session bookkeeping
//! so route handlers can stay focused on cookies, status codes, and redirects.

pub mod auth;
pub mod session;
