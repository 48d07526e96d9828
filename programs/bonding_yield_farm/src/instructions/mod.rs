//! Instruction handlers for the Bonding Yield Farm program.
//!
//! Stake and withdraw are split into a pure `plan_*` step that validates and
//! computes every new value, and a `commit` that writes them once the asset
//! transfer has gone through.

pub mod fund_reserve;
pub mod initialize;
pub mod stake;
pub mod views;
pub mod withdraw;

pub use fund_reserve::*;
pub use initialize::*;
pub use stake::*;
pub use views::*;
pub use withdraw::*;
