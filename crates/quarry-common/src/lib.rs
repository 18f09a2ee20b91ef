//! Common utilities for quarry.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated diagnostics for tolerated but unsupported input

pub mod warning;
