//! Session-aware UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_provider` owns the session, `guards` and `auth_layout` decide what a
//! route may show based on it.

pub mod auth_layout;
pub mod auth_provider;
pub mod guards;
