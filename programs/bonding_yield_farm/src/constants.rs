//! Program constants for the Bonding Yield Farm program.
//!
//! PDA seeds, the reward scale and time helpers shared by every instruction.

/// Seed for deriving the pool PDA
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for deriving the pool's liquidity vault PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving staked position PDAs
pub const POSITION_SEED: &[u8] = b"position";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of seconds in a week, the lockup most clients default to
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Denominator applied to `amount * reward_coefficient`.
///
/// The reward coefficient is expressed in basis points: a coefficient of
/// 100 credits 1% of every deposit.
pub const REWARD_SCALE: u128 = 10_000;
