use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::events::WinningsClaimed;
use crate::state::*;

#[derive(Accounts)]
pub struct Claim<'info> {
    /// The winner converting their bet into a payout.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// Global config — accumulates the fee.
    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The resolved market.
    #[account(
        mut,
        seeds = [SEED_MARKET, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// The bet being claimed.
    #[account(
        mut,
        seeds = [SEED_BET, market.key().as_ref(), bettor.key().as_ref()],
        bump = bet.bump,
        constraint = bet.bettor == bettor.key() @ ParimutuelError::NothingToClaim,
    )]
    pub bet: Account<'info, Bet>,

    /// Market vault — source of the payout.
    /// CHECK: Validated by seeds.
    #[account(
        mut,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// Fee treasury — receives the fee share.
    /// CHECK: Validated by seeds.
    #[account(
        mut,
        seeds = [SEED_TREASURY],
        bump = config.treasury_bump,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Claim>) -> Result<()> {
    let market = &ctx.accounts.market;
    let bet = &ctx.accounts.bet;

    // One arithmetic path for preview and claim: whatever previewClaim
    // quoted is exactly what moves here.
    let breakdown = market.preview_claim(bet)?;

    let vault_balance = ctx.accounts.vault.lamports();
    require!(
        breakdown.gross <= vault_balance,
        ParimutuelError::VaultInsolvency
    );

    // Move the gross out of the vault: net to the winner, fee to the
    // treasury.
    **ctx.accounts.vault.to_account_info().try_borrow_mut_lamports()? -= breakdown.gross;
    **ctx.accounts.bettor.to_account_info().try_borrow_mut_lamports()? += breakdown.net;
    **ctx.accounts.treasury.to_account_info().try_borrow_mut_lamports()? += breakdown.fee;

    // Spend the bet
    let bet = &mut ctx.accounts.bet;
    bet.claimed = true;

    // Settlement audit trail
    let market = &mut ctx.accounts.market;
    market.settled_amount = market
        .settled_amount
        .checked_add(breakdown.gross)
        .ok_or(ParimutuelError::Overflow)?;

    let config = &mut ctx.accounts.config;
    config.fee_balance = config
        .fee_balance
        .checked_add(breakdown.fee)
        .ok_or(ParimutuelError::Overflow)?;

    emit!(WinningsClaimed {
        market_id: market.market_id,
        bettor: bet.bettor,
        gross: breakdown.gross,
        fee: breakdown.fee,
        net: breakdown.net,
    });

    msg!(
        "Claimed: user={} gross={} fee={} ({}bps on profit) net={}, market #{}",
        bet.bettor,
        breakdown.gross,
        breakdown.fee,
        breakdown.fee_bps,
        breakdown.net,
        market.market_id,
    );

    Ok(())
}
