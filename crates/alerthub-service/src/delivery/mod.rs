//! Per-user delivery state and derived view state.

pub mod schedule;
pub mod service;
pub mod view;

pub use schedule::end_of_local_day;
pub use service::DeliveryService;
pub use view::AlertView;
