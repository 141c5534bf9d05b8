//! In-process adapters that live inside the domain crate for convenience.
//!
//! The static repository backs the demo mode and unit tests. The database
//! adapter lives in its own crate.

pub mod static_repo;
