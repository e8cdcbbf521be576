//! Command implementations for nswrap

pub mod namespace;

pub use namespace::run_namespace;
