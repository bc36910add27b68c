//! Shared vocabulary for the Sanstha admin backend.
//!
//! Pure types and logic with no I/O: database id aliases, the domain error
//! type, and upload filename derivation.

pub mod error;
pub mod naming;
pub mod types;
