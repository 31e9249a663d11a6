//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod documents;
pub mod identity;
pub mod ports;
pub mod scheduler;
