//! Per-user delivery state entities.

pub mod model;

pub use model::NotificationDelivery;
