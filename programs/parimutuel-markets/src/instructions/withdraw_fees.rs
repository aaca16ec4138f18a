use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::events::FeesWithdrawn;
use crate::state::*;

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    /// Platform operator — the only identity allowed to drain fees.
    #[account(
        mut,
        constraint = authority.key() == config.authority @ ParimutuelError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Fee treasury — drained in full.
    /// CHECK: Validated by seeds.
    #[account(
        mut,
        seeds = [SEED_TREASURY],
        bump = config.treasury_bump,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<WithdrawFees>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let amount = config.fee_balance;

    if amount > 0 {
        let treasury_balance = ctx.accounts.treasury.lamports();
        require!(amount <= treasury_balance, ParimutuelError::VaultInsolvency);

        **ctx.accounts.treasury.to_account_info().try_borrow_mut_lamports()? -= amount;
        **ctx.accounts.authority.to_account_info().try_borrow_mut_lamports()? += amount;
    }

    config.fee_balance = 0;

    emit!(FeesWithdrawn {
        authority: ctx.accounts.authority.key(),
        amount,
    });

    msg!(
        "Fees withdrawn: {} lamports to {}",
        amount,
        ctx.accounts.authority.key(),
    );

    Ok(())
}
