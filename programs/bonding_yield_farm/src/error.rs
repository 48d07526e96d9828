//! Error types for the Bonding Yield Farm program.
//!
//! Every rejected instruction returns one of these codes and leaves the pool
//! and position accounts unchanged. Codes are assigned in declaration order
//! starting at 6000 (Anchor's custom error offset), so new variants go at the
//! end of the enum.

use anchor_lang::prelude::*;

/// Custom error codes for the Bonding Yield Farm program.
#[error_code]
pub enum FarmError {
    // ========== Input Validation Errors ==========

    /// [6000] Pool caps are inconsistent.
    #[msg("Invalid pool parameters: max deposit per user exceeds total max liquidity")]
    InvalidParameters,

    /// [6001] Stake or withdraw with zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6002] The pool has already been initialized.
    #[msg("Pool is already initialized")]
    AlreadyInitialized,

    // ========== State/Balance Errors ==========

    /// [6003] The pool account has not been initialized.
    #[msg("Pool not found")]
    PoolNotFound,

    /// [6004] No staked position exists for this pool and owner.
    #[msg("Staked position not found for this pool and owner")]
    PositionNotFound,

    /// [6005] The stake would push the position over the per-user cap.
    #[msg("User deposit limit exceeded")]
    DepositCapExceeded,

    /// [6006] The stake would push the pool over its liquidity cap.
    #[msg("Pool liquidity limit exceeded")]
    LiquidityCapExceeded,

    /// [6007] Withdraw amount exceeds the staked amount.
    #[msg("Insufficient staked balance for this operation")]
    InsufficientStakedBalance,

    /// [6008] The source token account cannot cover the transfer.
    #[msg("Asset transfer failed: source balance is insufficient")]
    AssetTransferFailed,

    // ========== Time/Lock Errors ==========

    /// [6009] The position's lockup has not expired yet.
    #[msg("Lockup period has not elapsed - cannot withdraw yet")]
    LockupNotElapsed,

    // ========== Math/Overflow Errors ==========

    /// [6010] Arithmetic overflow or underflow during ledger math.
    #[msg("Arithmetic overflow occurred during calculation")]
    ArithmeticOverflow,

    // ========== Authorization Errors ==========

    /// [6011] Signer does not own the position.
    #[msg("Unauthorized: signer does not own this position")]
    Unauthorized,

    // ========== Account Validation Errors ==========

    /// [6012] Token account mint does not match the pool's liquidity mint.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6013] The provided vault is not the pool's liquidity vault.
    #[msg("Liquidity vault address mismatch")]
    VaultMismatch,
}
