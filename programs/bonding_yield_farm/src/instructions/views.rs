//! Read-only views over pool and position accounts.
//!
//! Results are returned as instruction return data, so clients can simulate
//! these instructions instead of decoding account data themselves.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FarmError;
use crate::state::{Pool, PoolSnapshot, PositionSnapshot, StakedPosition};

#[derive(Accounts)]
pub struct GetPool<'info> {
    #[account(
        seeds = [POOL_SEED, pool.liquidity_mint.as_ref(), pool.authority.as_ref()],
        bump = pool.bump,
        constraint = pool.is_initialized @ FarmError::PoolNotFound
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
pub struct GetPosition<'info> {
    #[account(
        seeds = [POOL_SEED, pool.liquidity_mint.as_ref(), pool.authority.as_ref()],
        bump = pool.bump,
        constraint = pool.is_initialized @ FarmError::PoolNotFound
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [POSITION_SEED, pool.key().as_ref(), position.owner.as_ref()],
        bump = position.bump,
        constraint = position.pool == pool.key() @ FarmError::PositionNotFound
    )]
    pub position: Account<'info, StakedPosition>,
}

pub fn get_pool_handler(ctx: Context<GetPool>) -> Result<PoolSnapshot> {
    Ok(ctx.accounts.pool.snapshot())
}

/// The snapshot's status is evaluated against the current clock.
pub fn get_position_handler(ctx: Context<GetPosition>) -> Result<PositionSnapshot> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.position.snapshot(clock.unix_timestamp))
}
