use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod tests;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod parimutuel_markets {
    use super::*;

    /// One-time protocol genesis: records the operator authority and
    /// the platform thresholds (minimum stake, minimum pool activity).
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Create a new parimutuel market. Operator-only.
    ///
    /// Markets carry 2 outcomes, or 3 when a draw is legal (two-team
    /// contests without a forced winner). IDs are assigned
    /// monotonically from the global config.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        instructions::create_market::handler(ctx, params)
    }

    /// Place a bet on one outcome.
    ///
    /// One bet per participant per market, at or above the platform
    /// minimum, strictly before the start time. The fee tier in force
    /// right now (2% early / 3% late) is locked into the bet and never
    /// recomputed.
    pub fn place_bet(ctx: Context<PlaceBet>, outcome: u8, amount: u64) -> Result<()> {
        instructions::place_bet::handler(ctx, outcome, amount)
    }

    /// Close betting once the start time has passed. Anyone may crank
    /// this.
    ///
    /// A market below the activity threshold, or with stake on fewer
    /// than two outcomes, is cancelled (refunds open). Otherwise the
    /// parimutuel odds are frozen from the net pool and the market
    /// awaits its result.
    pub fn close_betting(ctx: Context<CloseBetting>) -> Result<()> {
        instructions::close_betting::handler(ctx)
    }

    /// Deliver the authoritative result. Operator-only, exactly once,
    /// only on a closed (not cancelled) market.
    pub fn set_result(ctx: Context<SetResult>, outcome: u8) -> Result<()> {
        instructions::set_result::handler(ctx, outcome)
    }

    /// Convert a winning bet into a payout, exactly once.
    ///
    ///   gross = stake × frozen odds
    ///   fee   = profit × the tier locked at placement
    ///   net   = gross − fee
    ///
    /// The fee never touches principal. Losing bets cannot claim and
    /// are not refunded.
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    /// Reclaim the original stake from a cancelled market, fee-free,
    /// exactly once.
    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        instructions::refund::handler(ctx)
    }

    /// Drain the accumulated platform fees to the operator and zero
    /// the balance. Operator-only.
    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        instructions::withdraw_fees::handler(ctx)
    }
}
