use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::events::MarketCreated;
use crate::state::*;

/// Parameters for creating a new parimutuel market.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateMarketParams {
    /// Human-readable label (max 256 bytes).
    pub label: String,

    /// Unix timestamp the underlying event starts at.
    pub start_time: i64,

    /// 2 outcomes, or 3 when a draw is legal.
    pub outcome_count: u8,
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Platform operator — pays for account allocation.
    #[account(
        mut,
        constraint = authority.key() == config.authority @ ParimutuelError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    /// Global config — provides next_market_id.
    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Market PDA — the ledger record for this market.
    #[account(
        init,
        payer = authority,
        space = Market::SIZE,
        seeds = [SEED_MARKET, config.next_market_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// Vault PDA — holds all stakes for this market.
    /// CHECK: Initialized as a PDA; no data, just lamports.
    #[account(
        mut,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
    require!(
        params.label.len() <= MAX_LABEL_LEN,
        ParimutuelError::LabelTooLong
    );
    require!(
        params.outcome_count >= MIN_OUTCOMES && params.outcome_count <= MAX_OUTCOMES,
        ParimutuelError::InvalidOutcomeCount
    );

    let clock = Clock::get()?;
    require!(
        params.start_time > clock.unix_timestamp,
        ParimutuelError::StartTimeInPast
    );

    let market = &mut ctx.accounts.market;
    let config = &mut ctx.accounts.config;

    market.market_id = config.next_market_id;
    market.label = params.label;
    market.start_time = params.start_time;
    market.outcome_count = params.outcome_count;
    market.status = MarketStatus::Open;
    market.winning_outcome = 0;
    market.pools = [0; POOL_SLOTS];
    market.frozen_odds = [0; POOL_SLOTS];
    market.freeze_fee_bps = 0;
    market.settled_amount = 0;
    market.total_bets = 0;
    market.vault_bump = ctx.bumps.vault;
    market.bump = ctx.bumps.market;

    config.next_market_id = config
        .next_market_id
        .checked_add(1)
        .ok_or(ParimutuelError::Overflow)?;
    config.total_markets = config
        .total_markets
        .checked_add(1)
        .ok_or(ParimutuelError::Overflow)?;

    emit!(MarketCreated {
        market_id: market.market_id,
        label: market.label.clone(),
        start_time: market.start_time,
        outcome_count: market.outcome_count,
    });

    msg!(
        "Market #{} created: {} | start: {} | outcomes: {}",
        market.market_id,
        market.label,
        market.start_time,
        market.outcome_count,
    );

    Ok(())
}
