//! End-to-end tests driving `AuthService` over in-memory stores

pub mod expiration_test;
pub mod ttl_bounds_test;
