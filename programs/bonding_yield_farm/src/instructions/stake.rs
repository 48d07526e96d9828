//! Stake instruction handler.
//!
//! Deposits liquidity into the pool, credits the deposit's reward and extends
//! the position's lockup.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::events::Staked;
use crate::reward::compute_reward;
use crate::state::{extended_lockup_expiry, Pool, PositionSnapshot, StakedPosition};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user staking liquidity.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The pool.
    #[account(
        mut,
        seeds = [POOL_SEED, pool.liquidity_mint.as_ref(), pool.authority.as_ref()],
        bump = pool.bump,
        constraint = pool.is_initialized @ FarmError::PoolNotFound,
        has_one = liquidity_vault @ FarmError::VaultMismatch,
        has_one = liquidity_mint @ FarmError::MintMismatch
    )]
    pub pool: Account<'info, Pool>,

    /// User's position (created on the first stake).
    #[account(
        init_if_needed,
        payer = user,
        space = StakedPosition::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, StakedPosition>,

    pub liquidity_mint: Account<'info, Mint>,

    /// User's token account for the liquidity asset.
    #[account(
        mut,
        constraint = user_token_account.mint == liquidity_mint.key() @ FarmError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ FarmError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool custody.
    #[account(mut)]
    pub liquidity_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,
}

/// Fully validated outcome of a stake, ready to be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakePlan {
    pub owner: Pubkey,
    pub deposit: u64,
    pub reward: u64,
    /// True when the reward was added to the staked amount.
    pub compounded: bool,
    pub is_compound: bool,
    pub now: i64,

    pub position_amount: u64,
    pub farm_credit: u64,
    pub lockup_expiry: i64,

    pub total_staked: u64,
    pub total_rewards_distributed: u64,
    pub reward_reserve: u64,
    pub staker_count: u64,
    pub new_top_staker: bool,
}

/// Validate a stake of `amount` by `owner` and compute every resulting value.
///
/// Nothing is written; a rejected stake leaves `pool` and `position` as they
/// were. Checks run in order: pool active, non-zero amount, per-user cap,
/// pool cap, then reward and lockup arithmetic.
///
/// When `is_compound` is set the reward is added to the stake only if both
/// caps still hold afterwards and the pool's reward reserve covers it. The
/// reserve already sits in the vault, so a compounded reward moves from
/// `reward_reserve` to `total_staked` and stays fully backed. Otherwise the
/// reward is banked as farm credit and the base stake still goes through.
pub fn plan_stake(
    pool: &Pool,
    position: &StakedPosition,
    owner: Pubkey,
    amount: u64,
    is_compound: bool,
    lockup_period: u64,
    now: i64,
) -> Result<StakePlan> {
    require!(pool.is_initialized, FarmError::PoolNotFound);
    require!(amount > 0, FarmError::ZeroAmount);

    let base_amount = position
        .amount
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;
    require!(
        base_amount <= pool.max_deposit_per_user,
        FarmError::DepositCapExceeded
    );

    let base_total = pool
        .total_staked
        .checked_add(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;
    require!(
        base_total <= pool.total_max_liquidity,
        FarmError::LiquidityCapExceeded
    );

    let reward = compute_reward(amount, pool.reward_coefficient)?;
    let lockup_expiry = extended_lockup_expiry(position.lockup_expiry, now, lockup_period)?;

    // A sum that overflows u64 is above both caps as well.
    let compounded_amounts = match (base_amount.checked_add(reward), base_total.checked_add(reward)) {
        (Some(compound_amount), Some(compound_total))
            if is_compound
                && reward <= pool.reward_reserve
                && compound_amount <= pool.max_deposit_per_user
                && compound_total <= pool.total_max_liquidity =>
        {
            Some((compound_amount, compound_total))
        }
        _ => None,
    };

    let (position_amount, total_staked, farm_credit, reward_reserve) = match compounded_amounts {
        Some((compound_amount, compound_total)) => (
            compound_amount,
            compound_total,
            position.farm_credit,
            pool.reward_reserve
                .checked_sub(reward)
                .ok_or(FarmError::ArithmeticOverflow)?,
        ),
        None => (
            base_amount,
            base_total,
            position
                .farm_credit
                .checked_add(reward)
                .ok_or(FarmError::ArithmeticOverflow)?,
            pool.reward_reserve,
        ),
    };

    let total_rewards_distributed = pool
        .total_rewards_distributed
        .checked_add(reward)
        .ok_or(FarmError::ArithmeticOverflow)?;

    let staker_count = if position.amount == 0 {
        pool.staker_count
            .checked_add(1)
            .ok_or(FarmError::ArithmeticOverflow)?
    } else {
        pool.staker_count
    };

    Ok(StakePlan {
        owner,
        deposit: amount,
        reward,
        compounded: compounded_amounts.is_some(),
        is_compound,
        now,
        position_amount,
        farm_credit,
        lockup_expiry,
        total_staked,
        total_rewards_distributed,
        reward_reserve,
        staker_count,
        new_top_staker: position_amount > pool.top_staker_amount,
    })
}

impl StakePlan {
    /// Write the planned values. Pool and position change together or not at all.
    pub fn commit(&self, pool: &mut Pool, position: &mut StakedPosition) {
        position.amount = self.position_amount;
        position.farm_credit = self.farm_credit;
        position.lockup_expiry = self.lockup_expiry;
        position.is_compound = self.is_compound;
        position.last_stake_time = self.now;

        pool.total_staked = self.total_staked;
        pool.total_rewards_distributed = self.total_rewards_distributed;
        pool.reward_reserve = self.reward_reserve;
        pool.staker_count = self.staker_count;
        if self.new_top_staker {
            pool.top_staker = self.owner;
            pool.top_staker_amount = self.position_amount;
        }
        pool.last_updated = self.now;
    }
}

/// Stake liquidity into the pool.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Amount of the liquidity asset to deposit
/// * `is_compound` - Add the reward to the stake instead of farm credit
/// * `lockup_period` - Seconds from now before the position may withdraw
///
/// # Returns
/// The position after the stake
pub fn handler(
    ctx: Context<Stake>,
    amount: u64,
    is_compound: bool,
    lockup_period: u64,
) -> Result<PositionSnapshot> {
    let clock = Clock::get()?;
    let user_key = ctx.accounts.user.key();
    let pool_key = ctx.accounts.pool.key();

    let plan = plan_stake(
        &ctx.accounts.pool,
        &ctx.accounts.position,
        user_key,
        amount,
        is_compound,
        lockup_period,
        clock.unix_timestamp,
    )?;

    require!(
        ctx.accounts.user_token_account.amount >= amount,
        FarmError::AssetTransferFailed
    );

    // Transfer liquidity from user to pool custody
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.liquidity_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    let position = &mut ctx.accounts.position;
    let pool = &mut ctx.accounts.pool;

    // If first time staking, record who owns the position
    position.open(user_key, pool_key, ctx.bumps.position, clock.unix_timestamp);
    plan.commit(pool, position);

    msg!("Staked {} tokens, reward {}", amount, plan.reward);
    msg!(
        "Reward {}",
        if plan.compounded { "compounded into stake" } else { "credited to farm balance" }
    );
    msg!("Position: {} staked, {} farm credit", position.amount, position.farm_credit);
    msg!(
        "Locked until: {} ({}s remaining)",
        position.lockup_expiry,
        position.remaining_lockup(clock.unix_timestamp)
    );
    msg!("Pool total staked: {}, reward reserve: {}", pool.total_staked, pool.reward_reserve);

    emit!(Staked {
        pool: pool_key,
        user: user_key,
        amount,
        reward: plan.reward,
        compounded: plan.compounded,
        lockup_expiry: position.lockup_expiry,
        total_staked: pool.total_staked,
    });

    Ok(position.snapshot(clock.unix_timestamp))
}
