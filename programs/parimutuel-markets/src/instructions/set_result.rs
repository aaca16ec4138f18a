use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::events::MarketResolved;
use crate::state::*;

#[derive(Accounts)]
pub struct SetResult<'info> {
    /// Platform operator — the only identity allowed to deliver the
    /// authoritative outcome.
    #[account(
        constraint = authority.key() == config.authority @ ParimutuelError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market to resolve.
    #[account(
        mut,
        seeds = [SEED_MARKET, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<SetResult>, outcome: u8) -> Result<()> {
    let market = &mut ctx.accounts.market;
    market.set_result(outcome)?;

    emit!(MarketResolved {
        market_id: market.market_id,
        winning_outcome: outcome,
    });

    msg!(
        "Market #{} resolved: outcome={} odds={} pool={}",
        market.market_id,
        outcome,
        market.frozen_odds[(outcome - 1) as usize],
        market.total_pool(),
    );

    Ok(())
}
