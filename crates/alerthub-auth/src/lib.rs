//! # alerthub-auth
//!
//! Verification of identity-provider bearer tokens, plus an encoder used
//! by the CLI and tests to mint compatible tokens.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
