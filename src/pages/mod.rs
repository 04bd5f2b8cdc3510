//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and backend calls. Access control lives in
//! the route table (`components::guards`, `components::auth_layout`), never
//! in the pages themselves.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod password_recovery;
pub mod reset_password;
pub mod signup;
pub mod verify_email;
