use anchor_lang::prelude::*;

/// Custom error codes for the parimutuel markets program.
///
/// Error codes are offset from 6000 (Anchor convention). A missing
/// Market or Bet account surfaces as the runtime's account-not-found
/// before any of these are reached.
#[error_code]
pub enum ParimutuelError {
    /// Market is not accepting bets.
    #[msg("Market is not open")]
    MarketNotOpen,

    /// Betting cannot be closed before the scheduled start time.
    #[msg("Market start time has not been reached")]
    MarketNotStarted,

    /// Betting was already closed for this market.
    #[msg("Market already closed")]
    MarketAlreadyClosed,

    /// A result can only be set on a closed market.
    #[msg("Market is not closed")]
    MarketNotClosed,

    /// The result for this market was already set.
    #[msg("Market already resolved")]
    MarketAlreadyResolved,

    /// Claims require a resolved market.
    #[msg("Market is not resolved")]
    MarketNotResolved,

    /// Market was cancelled for insufficient activity.
    #[msg("Market was cancelled")]
    MarketCancelled,

    /// Refunds are only available on cancelled markets.
    #[msg("Market is not cancelled")]
    MarketNotCancelled,

    /// Outcome index is outside 1..=outcome_count.
    #[msg("Outcome index out of range")]
    InvalidOutcome,

    /// Markets carry 2 or 3 outcomes.
    #[msg("Outcome count must be 2 or 3")]
    InvalidOutcomeCount,

    /// Stake is below the platform-wide minimum.
    #[msg("Stake below minimum")]
    BelowMinimumStake,

    /// Participant already holds a bet on this market.
    #[msg("Participant already bet on this market")]
    DuplicateBet,

    /// Bets must be placed strictly before the start time.
    #[msg("Betting window closed")]
    BettingWindowClosed,

    /// No matching bet, already settled, or losing outcome.
    #[msg("Nothing to claim")]
    NothingToClaim,

    /// Caller is not the platform operator.
    #[msg("Unauthorized: not the operator")]
    Unauthorized,

    /// Label exceeds maximum length (256 bytes).
    #[msg("Label too long (max 256 bytes)")]
    LabelTooLong,

    /// Start time must be in the future.
    #[msg("Start time must be in the future")]
    StartTimeInPast,

    /// Overflow in arithmetic operation.
    #[msg("Arithmetic overflow")]
    Overflow,

    /// Vault balance insufficient (should never happen if invariants hold).
    #[msg("Vault insolvency detected")]
    VaultInsolvency,
}
