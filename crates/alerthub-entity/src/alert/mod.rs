//! Alert domain entities.

pub mod draft;
pub mod model;
pub mod scope;
pub mod severity;

pub use draft::{AlertDraft, AlertPatch};
pub use model::Alert;
pub use scope::VisibilityScope;
pub use severity::Severity;
