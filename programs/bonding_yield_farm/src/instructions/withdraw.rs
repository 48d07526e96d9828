//! Withdraw instruction handler.
//!
//! Returns staked liquidity from pool custody once the position's lockup has
//! expired.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::events::Withdrawn;
use crate::state::{Pool, PositionSnapshot, StakedPosition};

/// Accounts required for withdrawing.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The position owner.
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

    /// User's position.
    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.pool == pool.key() @ FarmError::PositionNotFound,
        constraint = position.owner == user.key() @ FarmError::Unauthorized
    )]
    pub position: Account<'info, StakedPosition>,

    pub liquidity_mint: Account<'info, Mint>,

    /// User's token account receiving the liquidity.
    #[account(
        mut,
        constraint = user_token_account.mint == liquidity_mint.key() @ FarmError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ FarmError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool custody.
    #[account(mut)]
    pub liquidity_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Fully validated outcome of a withdrawal, ready to be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawPlan {
    pub amount: u64,
    /// Farm credit given up with the withdrawn fraction of the stake.
    pub credit_released: u64,
    pub now: i64,

    pub position_amount: u64,
    pub farm_credit: u64,

    pub total_staked: u64,
    pub staker_count: u64,
}

/// Farm credit attached to `amount` out of a stake of `staked`.
///
/// `credit * amount / staked`, truncated toward zero. Never more than `credit`
/// while `amount <= staked`.
pub fn proportional_credit(credit: u64, amount: u64, staked: u64) -> Result<u64> {
    if staked == 0 {
        return Ok(0);
    }
    let released = (credit as u128)
        .checked_mul(amount as u128)
        .ok_or(FarmError::ArithmeticOverflow)?
        .checked_div(staked as u128)
        .ok_or(FarmError::ArithmeticOverflow)?;

    u64::try_from(released).map_err(|_| error!(FarmError::ArithmeticOverflow))
}

/// Validate a withdrawal of `amount` and compute every resulting value.
///
/// Nothing is written; a rejected withdrawal leaves `pool` and `position` as
/// they were.
pub fn plan_withdraw(
    pool: &Pool,
    position: &StakedPosition,
    amount: u64,
    now: i64,
) -> Result<WithdrawPlan> {
    require!(pool.is_initialized, FarmError::PoolNotFound);
    require!(position.exists(), FarmError::PositionNotFound);
    require!(amount > 0, FarmError::ZeroAmount);
    require!(
        position.amount >= amount,
        FarmError::InsufficientStakedBalance
    );
    require!(!position.is_locked(now), FarmError::LockupNotElapsed);

    let credit_released = proportional_credit(position.farm_credit, amount, position.amount)?;

    let position_amount = position
        .amount
        .checked_sub(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;
    let farm_credit = position
        .farm_credit
        .checked_sub(credit_released)
        .ok_or(FarmError::ArithmeticOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(FarmError::ArithmeticOverflow)?;

    let staker_count = if position_amount == 0 {
        pool.staker_count
            .checked_sub(1)
            .ok_or(FarmError::ArithmeticOverflow)?
    } else {
        pool.staker_count
    };

    Ok(WithdrawPlan {
        amount,
        credit_released,
        now,
        position_amount,
        farm_credit,
        total_staked,
        staker_count,
    })
}

impl WithdrawPlan {
    /// Write the planned values. Pool and position change together or not at all.
    pub fn commit(&self, pool: &mut Pool, position: &mut StakedPosition) {
        position.amount = self.position_amount;
        position.farm_credit = self.farm_credit;

        pool.total_staked = self.total_staked;
        pool.staker_count = self.staker_count;
        pool.last_updated = self.now;
    }
}

/// Withdraw staked liquidity from the pool.
///
/// Rejected while the position's lockup is running; there is no partial
/// withdrawal during lockup.
///
/// # Arguments
/// * `ctx` - Withdraw accounts context
/// * `amount` - Amount of the liquidity asset to withdraw
///
/// # Returns
/// The position after the withdrawal
pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<PositionSnapshot> {
    let clock = Clock::get()?;
    let user_key = ctx.accounts.user.key();
    let pool_key = ctx.accounts.pool.key();

    let plan = plan_withdraw(
        &ctx.accounts.pool,
        &ctx.accounts.position,
        amount,
        clock.unix_timestamp,
    )?;

    require!(
        ctx.accounts.liquidity_vault.amount >= amount,
        FarmError::AssetTransferFailed
    );

    // Transfer liquidity from pool custody to user using PDA signer
    let liquidity_mint = ctx.accounts.pool.liquidity_mint;
    let authority = ctx.accounts.pool.authority;
    let seeds = &[
        POOL_SEED,
        liquidity_mint.as_ref(),
        authority.as_ref(),
        &[ctx.accounts.pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.liquidity_vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.pool.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    let position = &mut ctx.accounts.position;
    let pool = &mut ctx.accounts.pool;
    plan.commit(pool, position);

    msg!("Withdrew {} tokens", amount);
    msg!("Remaining staked: {}", position.amount);
    msg!("Farm credit: {} ({} released)", position.farm_credit, plan.credit_released);
    msg!("Pool total staked: {}", pool.total_staked);

    emit!(Withdrawn {
        pool: pool_key,
        user: user_key,
        amount,
        credit_released: plan.credit_released,
        total_staked: pool.total_staked,
        timestamp: clock.unix_timestamp,
    });

    Ok(position.snapshot(clock.unix_timestamp))
}
