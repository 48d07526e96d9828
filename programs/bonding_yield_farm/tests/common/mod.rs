//! In-memory stand-in for the runtime: one pool, its positions, token
//! balances and a clock. Stake, withdraw and reserve funding follow the same
//! plan, transfer, commit order as the program handlers.

#![allow(dead_code)]

use std::collections::BTreeMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use bonding_yield_farm::error::FarmError;
use bonding_yield_farm::instructions::{plan_stake, plan_withdraw};
use bonding_yield_farm::state::{
    Pool, PoolKeys, PoolParams, PoolSnapshot, PositionSnapshot, StakedPosition,
};

pub const START: i64 = 1_700_000_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Farm {
    pub pool_key: Pubkey,
    pub pool: Pool,
    pub positions: BTreeMap<Pubkey, StakedPosition>,
    pub balances: BTreeMap<Pubkey, u64>,
    pub vault: u64,
    pub now: i64,
}

impl Farm {
    /// An uninitialized pool account.
    pub fn empty() -> Self {
        Self {
            pool_key: Pubkey::new_unique(),
            pool: Pool::default(),
            positions: BTreeMap::new(),
            balances: BTreeMap::new(),
            vault: 0,
            now: START,
        }
    }

    pub fn new(reward_coefficient: u64, max_deposit_per_user: u64, total_max_liquidity: u64) -> Self {
        let mut farm = Self::empty();
        farm.initialize(PoolParams {
            farm_asset_id: Pubkey::new_unique(),
            reward_coefficient,
            max_deposit_per_user,
            total_max_liquidity,
        })
        .expect("pool initializes");
        farm
    }

    pub fn initialize(&mut self, params: PoolParams) -> Result<Pubkey> {
        let keys = PoolKeys {
            authority: Pubkey::new_unique(),
            liquidity_mint: Pubkey::new_unique(),
            liquidity_vault: Pubkey::new_unique(),
            bump: 255,
            vault_bump: 254,
        };
        self.pool.initialize(keys, &params, self.now)?;
        Ok(self.pool_key)
    }

    pub fn user(&mut self, balance: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.balances.insert(user, balance);
        user
    }

    pub fn advance(&mut self, seconds: i64) {
        self.now += seconds;
    }

    pub fn stake(
        &mut self,
        user: Pubkey,
        amount: u64,
        is_compound: bool,
        lockup_period: u64,
    ) -> Result<PositionSnapshot> {
        let position = self.positions.get(&user).cloned().unwrap_or_default();
        let plan = plan_stake(&self.pool, &position, user, amount, is_compound, lockup_period, self.now)?;

        let balance = self.balances.get(&user).copied().unwrap_or(0);
        require!(balance >= amount, FarmError::AssetTransferFailed);
        self.balances.insert(user, balance - amount);
        self.vault += amount;

        let position = self.positions.entry(user).or_default();
        position.open(user, self.pool_key, 255, self.now);
        plan.commit(&mut self.pool, position);
        Ok(position.snapshot(self.now))
    }

    pub fn fund_reserve(&mut self, funder: Pubkey, amount: u64) -> Result<PoolSnapshot> {
        let mut funded = self.pool.clone();
        funded.fund_reserve(amount, self.now)?;

        let balance = self.balances.get(&funder).copied().unwrap_or(0);
        require!(balance >= amount, FarmError::AssetTransferFailed);
        self.balances.insert(funder, balance - amount);
        self.vault += amount;

        self.pool = funded;
        Ok(self.pool.snapshot())
    }

    pub fn withdraw(&mut self, user: Pubkey, amount: u64) -> Result<PositionSnapshot> {
        let position = self.positions.get(&user).cloned().unwrap_or_default();
        let plan = plan_withdraw(&self.pool, &position, amount, self.now)?;

        require!(self.vault >= amount, FarmError::AssetTransferFailed);
        self.vault -= amount;
        *self.balances.entry(user).or_insert(0) += amount;

        let position = self.positions.entry(user).or_default();
        plan.commit(&mut self.pool, position);
        Ok(position.snapshot(self.now))
    }

    pub fn get_pool(&self) -> Option<PoolSnapshot> {
        self.pool.is_initialized.then(|| self.pool.snapshot())
    }

    pub fn get_position(&self, owner: &Pubkey) -> Option<PositionSnapshot> {
        self.positions.get(owner).map(|position| position.snapshot(self.now))
    }

    pub fn position(&self, owner: &Pubkey) -> StakedPosition {
        self.positions.get(owner).cloned().unwrap_or_default()
    }

    pub fn sum_of_positions(&self) -> u64 {
        self.positions.values().map(|position| position.amount).sum()
    }

    /// Tokens the vault must hold for every recorded claim and the reserve.
    pub fn backed_custody(&self) -> u64 {
        self.pool.total_staked + self.pool.reward_reserve
    }

    pub fn active_positions(&self) -> u64 {
        self.positions.values().filter(|position| position.amount > 0).count() as u64
    }
}

pub fn assert_farm_error<T: std::fmt::Debug>(result: Result<T>, expected: FarmError) {
    let err = result.expect_err("operation should be rejected");
    assert_eq!(err, Error::from(expected));
}
