//! Database query implementations.

pub mod customers;
