use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::ProtocolInitialized;
use crate::state::*;

/// Parameters for protocol genesis.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeParams {
    /// Platform-wide minimum stake (lamports).
    pub min_stake: u64,

    /// Minimum total pool for a market to survive the activity check.
    pub min_activity_pool: u64,
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Becomes the platform operator.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global config PDA — singleton, created here.
    #[account(
        init,
        payer = authority,
        space = GlobalConfig::SIZE,
        seeds = [SEED_CONFIG],
        bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Fee treasury PDA — no data, just lamports.
    /// CHECK: Validated by seeds constraint.
    #[account(
        mut,
        seeds = [SEED_TREASURY],
        bump,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.authority = ctx.accounts.authority.key();
    config.next_market_id = 1;
    config.min_stake = params.min_stake;
    config.min_activity_pool = params.min_activity_pool;
    config.fee_balance = 0;
    config.total_markets = 0;
    config.total_volume = 0;
    config.bump = ctx.bumps.config;
    config.treasury_bump = ctx.bumps.treasury;

    emit!(ProtocolInitialized {
        authority: config.authority,
        min_stake: config.min_stake,
        min_activity_pool: config.min_activity_pool,
    });

    msg!(
        "Protocol initialized: operator={} min_stake={} min_activity_pool={}",
        config.authority,
        config.min_stake,
        config.min_activity_pool,
    );

    Ok(())
}
