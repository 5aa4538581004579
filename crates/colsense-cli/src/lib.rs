//! Profiler front end for the field-pattern engine.
//!
//! The binary lives in `main.rs`; these modules are shared with the
//! integration tests.

#![deny(unsafe_code)]

pub mod ingest;
pub mod logging;
pub mod profile;
