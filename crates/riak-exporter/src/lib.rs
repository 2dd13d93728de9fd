//! riak-exporter library entry.
//!
//! Wires config, the Riak collector and the HTTP surface together. Consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod collector;
pub mod config;
pub mod ops;
pub mod router;
