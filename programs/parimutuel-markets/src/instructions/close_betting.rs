use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::BettingClosed;
use crate::state::*;

#[derive(Accounts)]
pub struct CloseBetting<'info> {
    /// Anyone may crank the close once the start time has passed.
    pub caller: Signer<'info>,

    /// Global config — provides the activity threshold.
    #[account(
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market to close.
    #[account(
        mut,
        seeds = [SEED_MARKET, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<CloseBetting>) -> Result<()> {
    let clock = Clock::get()?;
    let market = &mut ctx.accounts.market;

    // Disambiguate from Anchor's `AccountsClose::close` on `Account`.
    let cancelled =
        Market::close(market, clock.unix_timestamp, ctx.accounts.config.min_activity_pool)?;

    emit!(BettingClosed {
        market_id: market.market_id,
        cancelled,
        total_pool: market.total_pool(),
        freeze_fee_bps: market.freeze_fee_bps,
    });

    if cancelled {
        msg!(
            "Market #{} cancelled at close: pool={} funded_outcomes={}",
            market.market_id,
            market.total_pool(),
            market.funded_outcomes(),
        );
    } else {
        msg!(
            "Market #{} closed: pool={} freeze_fee={}bps odds={:?}",
            market.market_id,
            market.total_pool(),
            market.freeze_fee_bps,
            &market.frozen_odds[..market.outcome_count as usize],
        );
    }

    Ok(())
}
