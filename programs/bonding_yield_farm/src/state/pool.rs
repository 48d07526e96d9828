use anchor_lang::prelude::*;

use crate::error::FarmError;

/// Immutable pool configuration captured by `initialize_pool`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolParams {
    pub farm_asset_id: Pubkey,
    /// Basis points of `REWARD_SCALE` credited per deposit.
    pub reward_coefficient: u64,
    pub max_deposit_per_user: u64,
    pub total_max_liquidity: u64,
}

impl PoolParams {
    /// A single position may never need more room than the whole pool.
    pub fn validate(&self) -> Result<()> {
        require!(
            self.max_deposit_per_user <= self.total_max_liquidity,
            FarmError::InvalidParameters
        );
        Ok(())
    }
}

/// Addresses and bumps fixed when the pool account is created.
#[derive(Clone, Copy, Debug)]
pub struct PoolKeys {
    pub authority: Pubkey,
    pub liquidity_mint: Pubkey,
    pub liquidity_vault: Pubkey,
    pub bump: u8,
    pub vault_bump: u8,
}

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Pool {
    pub authority: Pubkey,
    pub liquidity_mint: Pubkey,
    pub liquidity_vault: Pubkey,
    pub farm_asset_id: Pubkey,

    pub reward_coefficient: u64,
    pub max_deposit_per_user: u64,
    pub total_max_liquidity: u64,

    pub total_staked: u64,
    pub total_rewards_distributed: u64,
    pub staker_count: u64,

    /// Tokens held in the vault on top of `total_staked`, available to back
    /// compounded rewards. The vault always holds `total_staked + reward_reserve`.
    pub reward_reserve: u64,

    /// Largest position amount observed after any stake.
    pub top_staker: Pubkey,
    pub top_staker_amount: u64,

    pub is_initialized: bool,

    pub created_at: i64,
    pub last_updated: i64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl Pool {
    pub const LEN: usize = 8
        + (32 * 5)
        + (8 * 8)
        + 1
        + (8 * 2)
        + 2;

    /// Uninitialized -> Active. Runs once per pool account.
    pub fn initialize(&mut self, keys: PoolKeys, params: &PoolParams, now: i64) -> Result<()> {
        require!(!self.is_initialized, FarmError::AlreadyInitialized);
        params.validate()?;

        self.authority = keys.authority;
        self.liquidity_mint = keys.liquidity_mint;
        self.liquidity_vault = keys.liquidity_vault;
        self.farm_asset_id = params.farm_asset_id;
        self.reward_coefficient = params.reward_coefficient;
        self.max_deposit_per_user = params.max_deposit_per_user;
        self.total_max_liquidity = params.total_max_liquidity;
        self.total_staked = 0;
        self.total_rewards_distributed = 0;
        self.staker_count = 0;
        self.reward_reserve = 0;
        self.top_staker = Pubkey::default();
        self.top_staker_amount = 0;
        self.is_initialized = true;
        self.created_at = now;
        self.last_updated = now;
        self.bump = keys.bump;
        self.vault_bump = keys.vault_bump;

        Ok(())
    }

    pub fn params(&self) -> PoolParams {
        PoolParams {
            farm_asset_id: self.farm_asset_id,
            reward_coefficient: self.reward_coefficient,
            max_deposit_per_user: self.max_deposit_per_user,
            total_max_liquidity: self.total_max_liquidity,
        }
    }

    /// Liquidity that can still be staked before the pool cap is reached.
    pub fn remaining_capacity(&self) -> u64 {
        self.total_max_liquidity.saturating_sub(self.total_staked)
    }

    /// Add `amount` deposited tokens to the reward reserve and return the new reserve.
    pub fn fund_reserve(&mut self, amount: u64, now: i64) -> Result<u64> {
        require!(self.is_initialized, FarmError::PoolNotFound);
        require!(amount > 0, FarmError::ZeroAmount);

        self.reward_reserve = self
            .reward_reserve
            .checked_add(amount)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.last_updated = now;

        Ok(self.reward_reserve)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            authority: self.authority,
            liquidity_mint: self.liquidity_mint,
            farm_asset_id: self.farm_asset_id,
            reward_coefficient: self.reward_coefficient,
            max_deposit_per_user: self.max_deposit_per_user,
            total_max_liquidity: self.total_max_liquidity,
            total_staked: self.total_staked,
            total_rewards_distributed: self.total_rewards_distributed,
            staker_count: self.staker_count,
            reward_reserve: self.reward_reserve,
            top_staker: self.top_staker,
            top_staker_amount: self.top_staker_amount,
        }
    }
}

/// Pool view returned by `get_pool`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub authority: Pubkey,
    pub liquidity_mint: Pubkey,
    pub farm_asset_id: Pubkey,
    pub reward_coefficient: u64,
    pub max_deposit_per_user: u64,
    pub total_max_liquidity: u64,
    pub total_staked: u64,
    pub total_rewards_distributed: u64,
    pub staker_count: u64,
    pub reward_reserve: u64,
    pub top_staker: Pubkey,
    pub top_staker_amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn keys() -> PoolKeys {
        PoolKeys {
            authority: Pubkey::new_unique(),
            liquidity_mint: Pubkey::new_unique(),
            liquidity_vault: Pubkey::new_unique(),
            bump: 254,
            vault_bump: 253,
        }
    }

    fn params(max_per_user: u64, max_total: u64) -> PoolParams {
        PoolParams {
            farm_asset_id: Pubkey::new_unique(),
            reward_coefficient: 100,
            max_deposit_per_user: max_per_user,
            total_max_liquidity: max_total,
        }
    }

    #[test]
    fn test_initialize_sets_active_pool() {
        let mut pool = Pool::default();
        let keys = keys();
        let params = params(1_000, 10_000);

        pool.initialize(keys, &params, 1_700_000_000).unwrap();

        assert!(pool.is_initialized);
        assert_eq!(pool.authority, keys.authority);
        assert_eq!(pool.total_staked, 0);
        assert_eq!(pool.params(), params);
        assert_eq!(pool.remaining_capacity(), 10_000);
        assert_eq!(pool.created_at, 1_700_000_000);
    }

    #[test]
    fn test_reinitialize_rejected_without_mutation() {
        let mut pool = Pool::default();
        pool.initialize(keys(), &params(1_000, 10_000), 10).unwrap();
        pool.total_staked = 500;
        let before = pool.clone();

        let err = pool.initialize(keys(), &params(5, 5), 20).unwrap_err();

        assert_eq!(err, Error::from(FarmError::AlreadyInitialized));
        assert_eq!(pool, before);
    }

    #[test]
    fn test_per_user_cap_above_pool_cap_rejected() {
        let mut pool = Pool::default();

        let err = pool.initialize(keys(), &params(10_001, 10_000), 0).unwrap_err();

        assert_eq!(err, Error::from(FarmError::InvalidParameters));
        assert_eq!(pool, Pool::default());
    }

    #[test]
    fn test_equal_caps_and_zero_caps_allowed() {
        let mut pool = Pool::default();
        pool.initialize(keys(), &params(10_000, 10_000), 0).unwrap();

        let mut empty = Pool::default();
        empty.initialize(keys(), &params(0, 0), 0).unwrap();
        assert_eq!(empty.remaining_capacity(), 0);
    }

    #[test]
    fn test_fund_reserve_accumulates() {
        let mut pool = Pool::default();
        pool.initialize(keys(), &params(1_000, 10_000), 0).unwrap();

        assert_eq!(pool.fund_reserve(50, 10).unwrap(), 50);
        assert_eq!(pool.fund_reserve(25, 20).unwrap(), 75);
        assert_eq!(pool.snapshot().reward_reserve, 75);
        assert_eq!(pool.last_updated, 20);
        assert_eq!(pool.total_staked, 0);
    }

    #[test]
    fn test_fund_reserve_rejects_zero_and_uninitialized() {
        let mut pool = Pool::default();
        let err = pool.fund_reserve(10, 0).unwrap_err();
        assert_eq!(err, Error::from(FarmError::PoolNotFound));

        pool.initialize(keys(), &params(1_000, 10_000), 0).unwrap();
        let before = pool.clone();
        let err = pool.fund_reserve(0, 5).unwrap_err();
        assert_eq!(err, Error::from(FarmError::ZeroAmount));
        assert_eq!(pool, before);

        pool.reward_reserve = u64::MAX;
        let err = pool.fund_reserve(1, 5).unwrap_err();
        assert_eq!(err, Error::from(FarmError::ArithmeticOverflow));
    }

    #[test]
    fn test_len_covers_serialized_size() {
        let pool = Pool::default();
        let data = pool.try_to_vec().unwrap();
        assert_eq!(data.len() + 8, Pool::LEN);
    }
}
