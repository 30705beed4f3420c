//! Core types and trait definitions for the rollcall attendance tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! server, the SQLite backend and the terminal client all depend on it.

pub mod error;
pub mod form;
pub mod materia;
pub mod store;

pub use error::ValidationError;
