//! # alerthub-entity
//!
//! Domain entity models for AlertHub. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod alert;
pub mod delivery;
pub mod user;
