use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::events::BetRefunded;
use crate::state::*;

#[derive(Accounts)]
pub struct Refund<'info> {
    /// The participant reclaiming their stake.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// The cancelled market.
    #[account(
        mut,
        seeds = [SEED_MARKET, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// The bet being refunded.
    #[account(
        mut,
        seeds = [SEED_BET, market.key().as_ref(), bettor.key().as_ref()],
        bump = bet.bump,
        constraint = bet.bettor == bettor.key() @ ParimutuelError::NothingToClaim,
    )]
    pub bet: Account<'info, Bet>,

    /// Market vault.
    /// CHECK: Validated by seeds.
    #[account(
        mut,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Refund>) -> Result<()> {
    let market = &ctx.accounts.market;
    let bet = &ctx.accounts.bet;

    // Principal back, no fee — cancellation is the platform's fault,
    // not the participant's.
    let amount = market.refund_amount(bet)?;

    let vault_balance = ctx.accounts.vault.lamports();
    require!(amount <= vault_balance, ParimutuelError::VaultInsolvency);

    **ctx.accounts.vault.to_account_info().try_borrow_mut_lamports()? -= amount;
    **ctx.accounts.bettor.to_account_info().try_borrow_mut_lamports()? += amount;

    // Spend the bet
    let bet = &mut ctx.accounts.bet;
    bet.refunded = true;

    let outcome = bet.outcome;
    let market = &mut ctx.accounts.market;
    market.release_stake(outcome, amount)?;
    market.settled_amount = market
        .settled_amount
        .checked_add(amount)
        .ok_or(ParimutuelError::Overflow)?;

    emit!(BetRefunded {
        market_id: market.market_id,
        bettor: bet.bettor,
        amount,
    });

    msg!(
        "Refund: {} lamports returned to {} for market #{}",
        amount,
        bet.bettor,
        market.market_id,
    );

    Ok(())
}
