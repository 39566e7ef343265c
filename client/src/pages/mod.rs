//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates validation and
//! auth rules to `util` and `state`.

pub mod dashboard;
pub mod home;
pub mod itinerary;
pub mod login;
pub mod not_found;
pub mod plan;
pub mod register;
