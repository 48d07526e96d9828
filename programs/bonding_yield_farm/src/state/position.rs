use anchor_lang::prelude::*;

use crate::error::FarmError;

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StakedPosition {
    pub owner: Pubkey,
    pub pool: Pubkey,

    pub amount: u64,
    pub farm_credit: u64,

    /// Unix timestamp before which withdrawals are rejected. Only ever raised.
    pub lockup_expiry: i64,
    /// Compounding flag of the most recent stake.
    pub is_compound: bool,

    pub first_stake_time: i64,
    pub last_stake_time: i64,

    pub bump: u8,
}

/// Lifecycle stage of a position, derived from its amount and the clock.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionStatus {
    Unstaked,
    Locked,
    Unlocked,
}

impl StakedPosition {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 1 + 8 + 8 + 1;

    /// A position account exists once its owner has been recorded by a stake.
    pub fn exists(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Record owner, pool and bump the first time a position is staked into.
    pub fn open(&mut self, owner: Pubkey, pool: Pubkey, bump: u8, now: i64) {
        if self.exists() {
            return;
        }
        self.owner = owner;
        self.pool = pool;
        self.bump = bump;
        self.first_stake_time = now;
    }

    pub fn is_locked(&self, now: i64) -> bool {
        now < self.lockup_expiry
    }

    pub fn status(&self, now: i64) -> PositionStatus {
        if self.amount == 0 {
            PositionStatus::Unstaked
        } else if self.is_locked(now) {
            PositionStatus::Locked
        } else {
            PositionStatus::Unlocked
        }
    }

    /// Seconds until the lockup expires, zero once it has.
    pub fn remaining_lockup(&self, now: i64) -> i64 {
        self.lockup_expiry.saturating_sub(now).max(0)
    }

    pub fn snapshot(&self, now: i64) -> PositionSnapshot {
        PositionSnapshot {
            owner: self.owner,
            pool: self.pool,
            amount: self.amount,
            farm_credit: self.farm_credit,
            lockup_expiry: self.lockup_expiry,
            is_compound: self.is_compound,
            status: self.status(now),
        }
    }
}

/// Lockup expiry after staking at `now` for `lockup_period` seconds.
///
/// The result is never earlier than `current_expiry`.
pub fn extended_lockup_expiry(current_expiry: i64, now: i64, lockup_period: u64) -> Result<i64> {
    let period = i64::try_from(lockup_period).map_err(|_| error!(FarmError::ArithmeticOverflow))?;
    let requested = now
        .checked_add(period)
        .ok_or(FarmError::ArithmeticOverflow)?;
    Ok(current_expiry.max(requested))
}

/// Position view returned by `stake`, `withdraw` and `get_position`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub owner: Pubkey,
    pub pool: Pubkey,
    pub amount: u64,
    pub farm_credit: u64,
    pub lockup_expiry: i64,
    pub is_compound: bool,
    pub status: PositionStatus,
}
