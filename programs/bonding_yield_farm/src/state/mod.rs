//! State structures for the Bonding Yield Farm program.
//!
//! This module defines the pool and position accounts and the snapshots
//! returned to clients.

pub mod pool;
pub mod position;

pub use pool::*;
pub use position::*;
