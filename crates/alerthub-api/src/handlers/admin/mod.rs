//! Admin-only handlers. Mounted behind the admin guard.

pub mod alert;
