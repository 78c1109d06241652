//! Request handlers, grouped by resource.

pub mod admin;
pub mod delivery;
pub mod health;
pub mod visibility;
