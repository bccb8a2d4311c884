//! Common types and utilities for nrlink
//!
//! This crate provides the shared plumbing used across the nrlink crates:
//! the workspace error type, logging setup, bit-level buffers for codec
//! work, the simulation time/timer model, and protocol identifier types.

pub mod bit_buffer;
pub mod error;
pub mod logging;
pub mod sim_time;
pub mod types;

pub use bit_buffer::{BitReader, BitWriter};
pub use error::{Error, Result};
pub use logging::{format_hex_compact, init_logging, init_logging_with_filter, Direction};
pub use sim_time::{SimTime, SimTimer};
pub use types::{ComponentCarrierId, HarqProcessId, Lcid, Rnti};
