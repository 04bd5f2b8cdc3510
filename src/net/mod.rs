//! Identity service access.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` is the backend seam the session provider consumes, `hosted`
//! the concrete client for the hosted auth service, and `types` the shared
//! identity DTOs and failure type.

pub mod hosted;
pub mod identity;
pub mod types;
