//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` holds the data model and its transitions; `provider` is the one
//! place that writes it and exposes the read hook.

pub mod provider;
pub mod session;
