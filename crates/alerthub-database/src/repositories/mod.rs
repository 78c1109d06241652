//! PostgreSQL repository implementations.

pub mod alert;
pub mod delivery;

pub use alert::AlertRepository;
pub use delivery::DeliveryRepository;
