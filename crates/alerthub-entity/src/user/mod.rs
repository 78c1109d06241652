//! Viewer-side user entities.

pub mod role;

pub use role::UserRole;
