//! `agendum-auth` — transport-agnostic authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The domain
//! never authenticates; it only receives the acting `UserId` extracted here.

pub mod claims;
pub mod jwt;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
