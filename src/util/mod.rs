//! Utility helpers shared across guards and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps router/history and link parsing details out of guard decisions and
//! page components so those stay pure.

pub mod link_params;
pub mod return_to;
