//! Reward model.
//!
//! Farm credit for a deposit is `amount * reward_coefficient / REWARD_SCALE`,
//! computed in `u128` so the product of two `u64` values cannot wrap. The
//! result must fit back into `u64`; anything larger is an overflow error,
//! never a saturated value.

use anchor_lang::prelude::*;

use crate::constants::REWARD_SCALE;
use crate::error::FarmError;

/// Compute the farm credit earned by depositing `amount` into a pool with the
/// given `reward_coefficient` (basis points of `REWARD_SCALE`).
///
/// Integer division truncates toward zero, so deposits too small to earn a
/// whole unit of credit earn nothing.
pub fn compute_reward(amount: u64, reward_coefficient: u64) -> Result<u64> {
    let reward = (amount as u128)
        .checked_mul(reward_coefficient as u128)
        .ok_or(FarmError::ArithmeticOverflow)?
        .checked_div(REWARD_SCALE)
        .ok_or(FarmError::ArithmeticOverflow)?;

    u64::try_from(reward).map_err(|_| error!(FarmError::ArithmeticOverflow))
}
