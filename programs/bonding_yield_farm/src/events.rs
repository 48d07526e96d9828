//! Events emitted by the Bonding Yield Farm program.

use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub liquidity_mint: Pubkey,
    pub farm_asset_id: Pubkey,
    pub reward_coefficient: u64,
    pub max_deposit_per_user: u64,
    pub total_max_liquidity: u64,
}

#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    /// Reward computed for this deposit.
    pub reward: u64,
    /// True when `reward` was added to the staked amount.
    pub compounded: bool,
    pub lockup_expiry: i64,
    pub total_staked: u64,
}

#[event]
pub struct ReserveFunded {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub reward_reserve: u64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    /// Farm credit released with the withdrawn fraction.
    pub credit_released: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}
