/// Initialize pool instruction handler.
///
/// Creates the pool PDA and its liquidity vault and records the immutable
/// pool configuration.
///
/// ## Security Guarantees
/// - Vault is a PDA token account whose authority is the pool PDA
/// - Authority and liquidity mint are part of the pool seeds
/// - A second initialization is rejected with `AlreadyInitialized`

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::PoolInitialized;
use crate::state::{Pool, PoolKeys, PoolParams};

/// Accounts required for pool initialization.
///
/// `pool` and `liquidity_vault` use `init_if_needed` so that re-running the
/// instruction reaches the handler, which rejects it by checking
/// `pool.is_initialized`.
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// The authority that owns the pool. Recorded permanently.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The pool account, one per (liquidity mint, authority).
    #[account(
        init_if_needed,
        payer = authority,
        space = Pool::LEN,
        seeds = [POOL_SEED, liquidity_mint.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Mint of the asset users stake.
    pub liquidity_mint: Account<'info, Mint>,

    /// Pool custody for staked liquidity.
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = liquidity_mint,
        token::authority = pool
    )]
    pub liquidity_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new pool and return its address.
///
/// # Arguments
/// * `ctx` - InitializePool accounts context
/// * `params` - Farm asset, reward coefficient and caps
///
/// # Errors
/// * `AlreadyInitialized` - the pool PDA is already active
/// * `InvalidParameters` - `max_deposit_per_user > total_max_liquidity`
pub fn handler(ctx: Context<InitializePool>, params: PoolParams) -> Result<Pubkey> {
    let clock = Clock::get()?;
    let keys = PoolKeys {
        authority: ctx.accounts.authority.key(),
        liquidity_mint: ctx.accounts.liquidity_mint.key(),
        liquidity_vault: ctx.accounts.liquidity_vault.key(),
        bump: ctx.bumps.pool,
        vault_bump: ctx.bumps.liquidity_vault,
    };

    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;
    pool.initialize(keys, &params, clock.unix_timestamp)?;

    msg!("Bonding yield farm pool initialized: {}", pool_key);
    msg!("Authority: {}", keys.authority);
    msg!("Liquidity mint: {}", keys.liquidity_mint);
    msg!("Farm asset: {}", params.farm_asset_id);
    msg!(
        "Reward coefficient: {}bp, max per user: {}, max liquidity: {}",
        params.reward_coefficient,
        params.max_deposit_per_user,
        params.total_max_liquidity
    );

    emit!(PoolInitialized {
        pool: pool_key,
        authority: keys.authority,
        liquidity_mint: keys.liquidity_mint,
        farm_asset_id: params.farm_asset_id,
        reward_coefficient: params.reward_coefficient,
        max_deposit_per_user: params.max_deposit_per_user,
        total_max_liquidity: params.total_max_liquidity,
    });

    Ok(pool_key)
}
