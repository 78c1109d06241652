//! Admin alert management.

pub mod service;
pub mod validation;

pub use service::{AlertService, NewAlert};
pub use validation::normalize_draft;
