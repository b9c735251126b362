//! Application layer
//!
//! Use cases turn raw request input into domain values and delegate to the
//! domain services. They hold no state of their own.

pub mod auth;
pub mod job;
