//! # Bonding Yield Farm Program
//!
//! A single-pool staking program. Users deposit a liquidity token into the
//! pool and earn farm credit proportional to the pool's reward coefficient.
//!
//! - Per-user and pool-wide deposit caps
//! - Per-position lockup; a new stake can extend it, never shorten it
//! - Optional compounding of the deposit reward into the stake, backed by a
//!   reward reserve held in the vault
//! - Withdrawals give up farm credit in proportion to the amount withdrawn
//!
//! ## Accounts
//! - `Pool`: PDA `["pool", liquidity_mint, authority]`
//! - liquidity vault: PDA `["pool_vault", pool]`, token authority is the pool
//! - `StakedPosition`: PDA `["position", pool, owner]`
//!
//! Every instruction is a single transaction: if any check or the token
//! transfer fails, neither the pool nor the position changes.

use anchor_lang::prelude::*;

declare_id!("AbNTrViZTe1iAXzSWPEfWqKyNhFF19MxrDss2ReNMau5");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod reward;
pub mod state;

use instructions::*;
use state::{PoolParams, PoolSnapshot, PositionSnapshot};

#[program]
pub mod bonding_yield_farm {
    use super::*;

    /// Initializes the pool and its liquidity vault.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `farm_asset_id` - Asset identifier for farm credit
    /// * `reward_coefficient` - Reward in basis points of each deposit
    /// * `max_deposit_per_user` - Cap on any single position
    /// * `total_max_liquidity` - Cap on the pool's total stake
    ///
    /// # Errors
    /// Returns an error if the pool already exists or the per-user cap
    /// exceeds the pool cap.
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        farm_asset_id: Pubkey,
        reward_coefficient: u64,
        max_deposit_per_user: u64,
        total_max_liquidity: u64,
    ) -> Result<Pubkey> {
        let params = PoolParams {
            farm_asset_id,
            reward_coefficient,
            max_deposit_per_user,
            total_max_liquidity,
        };
        instructions::initialize::handler(ctx, params)
    }

    /// Stakes liquidity into the pool.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Amount of the liquidity token to stake
    /// * `is_compound` - Add the reward to the stake instead of farm credit
    /// * `lockup_period` - Lockup duration in seconds
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Either deposit cap would be exceeded
    /// - The user cannot cover the transfer
    pub fn stake(
        ctx: Context<Stake>,
        amount: u64,
        is_compound: bool,
        lockup_period: u64,
    ) -> Result<PositionSnapshot> {
        instructions::stake::handler(ctx, amount, is_compound, lockup_period)
    }

    /// Adds tokens to the pool's reward reserve. Permissionless.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for funding
    /// * `amount` - Amount of the liquidity token to add
    ///
    /// # Errors
    /// Returns an error if the amount is zero or the funder cannot cover it.
    pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<PoolSnapshot> {
        instructions::fund_reserve::handler(ctx, amount)
    }

    /// Withdraws liquidity from the user's position.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for withdrawing
    /// * `amount` - Amount of the liquidity token to withdraw
    ///
    /// # Errors
    /// Returns an error if:
    /// - The lockup has not elapsed
    /// - Amount exceeds the staked amount
    /// - Amount is zero
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<PositionSnapshot> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Returns the pool's current state.
    pub fn get_pool(ctx: Context<GetPool>) -> Result<PoolSnapshot> {
        instructions::views::get_pool_handler(ctx)
    }

    /// Returns a position's current state and lockup status.
    pub fn get_position(ctx: Context<GetPosition>) -> Result<PositionSnapshot> {
        instructions::views::get_position_handler(ctx)
    }
}

/// Pool PDA for a liquidity mint and authority.
pub fn pool_address(liquidity_mint: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[constants::POOL_SEED, liquidity_mint.as_ref(), authority.as_ref()],
        &ID,
    )
}

/// Liquidity vault PDA owned by `pool`.
pub fn vault_address(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[constants::POOL_VAULT_SEED, pool.as_ref()], &ID)
}

/// Position PDA for `owner` in `pool`.
pub fn position_address(pool: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[constants::POSITION_SEED, pool.as_ref(), owner.as_ref()], &ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_are_distinct_per_input() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let (pool, _) = pool_address(&mint, &authority);
        let (other_pool, _) = pool_address(&mint, &Pubkey::new_unique());
        assert_ne!(pool, other_pool);

        let (vault, _) = vault_address(&pool);
        assert_ne!(vault, pool);

        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        assert_ne!(position_address(&pool, &alice).0, position_address(&pool, &bob).0);
        assert_ne!(position_address(&pool, &alice).0, position_address(&other_pool, &alice).0);
    }

    #[test]
    fn test_addresses_are_stable() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        assert_eq!(pool_address(&mint, &authority), pool_address(&mint, &authority));
    }
}
