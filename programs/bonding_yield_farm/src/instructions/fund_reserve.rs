//! Fund reserve instruction handler.
//!
//! Deposits liquidity tokens into the pool vault as reward reserve. The
//! reserve backs rewards that stakers choose to compound, so compounded
//! positions can always be withdrawn in full.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::events::ReserveFunded;
use crate::state::{Pool, PoolSnapshot};

/// Accounts required to fund the reward reserve.
#[derive(Accounts)]
pub struct FundReserve<'info> {
    /// The funder; anyone may top up the reserve.
    pub funder: Signer<'info>,

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

    pub liquidity_mint: Account<'info, Mint>,

    /// Funder's token account.
    #[account(
        mut,
        constraint = funder_token_account.mint == liquidity_mint.key() @ FarmError::MintMismatch,
        constraint = funder_token_account.owner == funder.key() @ FarmError::Unauthorized
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Pool custody; holds the reserve alongside staked liquidity.
    #[account(mut)]
    pub liquidity_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Fund the reward reserve.
///
/// # Arguments
/// * `ctx` - FundReserve accounts context
/// * `amount` - Amount of the liquidity asset to add to the reserve
///
/// # Returns
/// The pool after funding
pub fn handler(ctx: Context<FundReserve>, amount: u64) -> Result<PoolSnapshot> {
    let clock = Clock::get()?;

    // Validate and compute on a copy; the pool is written after the transfer.
    let mut funded = (*ctx.accounts.pool).clone();
    let reward_reserve = funded.fund_reserve(amount, clock.unix_timestamp)?;

    require!(
        ctx.accounts.funder_token_account.amount >= amount,
        FarmError::AssetTransferFailed
    );

    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.liquidity_vault.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    let pool = &mut ctx.accounts.pool;
    pool.reward_reserve = funded.reward_reserve;
    pool.last_updated = funded.last_updated;

    msg!("Reward reserve funded with {} tokens", amount);
    msg!("New reward reserve: {}", reward_reserve);
    msg!("Funder: {}", ctx.accounts.funder.key());

    emit!(ReserveFunded {
        pool: pool.key(),
        funder: ctx.accounts.funder.key(),
        amount,
        reward_reserve,
    });

    Ok(pool.snapshot())
}
