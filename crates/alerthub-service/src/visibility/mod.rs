//! Alert visibility: who may see which alert, and when.

pub mod predicate;
pub mod service;
pub mod viewer;

pub use predicate::{can_view, is_visible, resolve};
pub use service::VisibilityService;
pub use viewer::Viewer;
