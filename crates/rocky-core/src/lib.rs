//! rocky-core
//!
//! Pure domain types for the Rocky safety engine: patient intake, findings,
//! diagnostic results, and the coercion rules applied to result-shaped data
//! coming from sources the engine does not control. No I/O.

pub mod error;
pub mod lenient;
pub mod models;
pub mod untrusted;
pub mod validation;
