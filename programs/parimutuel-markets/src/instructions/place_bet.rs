use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::events::BetPlaced;
use crate::state::*;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    /// The participant placing the wager.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// Global config — minimum stake and volume tracking.
    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market being bet on.
    #[account(
        mut,
        seeds = [SEED_MARKET, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Bet PDA — allocated lazily so a second placement into the same
    /// (market, bettor) slot surfaces DuplicateBet instead of a raw
    /// allocation failure.
    #[account(
        init_if_needed,
        payer = bettor,
        space = Bet::SIZE,
        seeds = [SEED_BET, market.key().as_ref(), bettor.key().as_ref()],
        bump,
    )]
    pub bet: Account<'info, Bet>,

    /// Market vault — receives the stake.
    /// CHECK: Validated by seeds constraint.
    #[account(
        mut,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBet>, outcome: u8, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let market = &ctx.accounts.market;
    market.admit_bet(
        &ctx.accounts.bet,
        outcome,
        amount,
        ctx.accounts.config.min_stake,
        now,
    )?;

    // The tier is a function of how far ahead of the start this bet
    // lands, locked here once and for all.
    let fee_bps = fee_tier_bps(market.start_time, now);

    // Transfer the stake from bettor to vault
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.bettor.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        amount,
    )?;

    // Update the outcome pool
    let market = &mut ctx.accounts.market;
    market.add_stake(outcome, amount)?;
    market.total_bets = market
        .total_bets
        .checked_add(1)
        .ok_or(ParimutuelError::Overflow)?;

    // Record the bet
    let bet = &mut ctx.accounts.bet;
    bet.market = market.key();
    bet.bettor = ctx.accounts.bettor.key();
    bet.outcome = outcome;
    bet.amount = amount;
    bet.fee_bps = fee_bps;
    bet.claimed = false;
    bet.refunded = false;
    bet.placed_at = now;
    bet.bump = ctx.bumps.bet;

    // Track global volume
    let config = &mut ctx.accounts.config;
    config.total_volume = config
        .total_volume
        .checked_add(amount)
        .ok_or(ParimutuelError::Overflow)?;

    emit!(BetPlaced {
        market_id: market.market_id,
        bettor: bet.bettor,
        outcome,
        amount,
        fee_bps,
    });

    msg!(
        "Bet placed: {} lamports on outcome {} for market #{} (fee tier {}bps)",
        amount,
        outcome,
        market.market_id,
        fee_bps,
    );

    Ok(())
}
