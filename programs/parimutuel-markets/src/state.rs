use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ParimutuelError;

/// Number of pool slots allocated per market. Markets with 2 outcomes
/// leave the third slot permanently zero.
pub const POOL_SLOTS: usize = MAX_OUTCOMES as usize;

/// Fee tier for an action happening at `now` against a market that
/// starts at `start_time`.
///
/// Strictly more than 24 hours before the start the early tier (2%)
/// applies; from then on the late tier (3%). Evaluated once at bet
/// placement and locked into the Bet, and once at close for the
/// market-wide freeze rate. Never re-evaluated at claim time — the
/// locked rate is the promised rate.
pub fn fee_tier_bps(start_time: i64, now: i64) -> u16 {
    if now < start_time.saturating_sub(EARLY_TIER_CUTOFF_SECS) {
        EARLY_FEE_BPS
    } else {
        LATE_FEE_BPS
    }
}

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", market_id.to_le_bytes()]
///
/// Stores all state for a single parimutuel market, including the
/// per-outcome pools and the odds snapshot taken when betting closes.
#[account]
pub struct Market {
    /// Unique numeric identifier (incrementing).
    pub market_id: u64,

    /// Human-readable label (max 256 bytes).
    pub label: String,

    /// Scheduled start time (Unix timestamp). Bets must precede it;
    /// closing is only effective from it onward.
    pub start_time: i64,

    /// Number of legal outcomes: 2, or 3 when a draw is possible.
    pub outcome_count: u8,

    /// Current lifecycle state.
    pub status: MarketStatus,

    /// Winning outcome index (1-based). Zero until Resolved.
    pub winning_outcome: u8,

    // ─── Pool accounting ───
    /// Cumulative stake per outcome. Outcome `i` lives in slot `i - 1`.
    pub pools: [u64; POOL_SLOTS],

    /// Odds snapshot taken at close, scaled by ODDS_SCALE
    /// (17_150 = 1.715×). Zero for unfunded outcomes and for markets
    /// that were cancelled instead of closed.
    pub frozen_odds: [u64; POOL_SLOTS],

    /// Market-wide fee rate used to derive the net pool at close.
    /// Individual bets keep their own locked tier; this rate only
    /// shapes the frozen odds.
    pub freeze_fee_bps: u16,

    // ─── Settlement state ───
    /// Total lamports already paid out of the vault.
    pub settled_amount: u64,

    /// Number of bets accepted.
    pub total_bets: u64,

    /// Vault bump seed.
    pub vault_bump: u8,

    /// Market PDA bump seed.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 64],
}

// `[u8; 64]` has no `Default` impl, so the derive can't be used here.
impl Default for Market {
    fn default() -> Self {
        Self {
            market_id: Default::default(),
            label: Default::default(),
            start_time: Default::default(),
            outcome_count: Default::default(),
            status: Default::default(),
            winning_outcome: Default::default(),
            pools: Default::default(),
            frozen_odds: Default::default(),
            freeze_fee_bps: Default::default(),
            settled_amount: Default::default(),
            total_bets: Default::default(),
            vault_bump: Default::default(),
            bump: Default::default(),
            _reserved: [0u8; 64],
        }
    }
}

impl Market {
    /// Account size for Anchor allocation.
    pub const SIZE: usize = DISCRIMINATOR_SIZE
        + 8                     // market_id
        + (4 + MAX_LABEL_LEN)   // label (String: 4-byte len + max bytes)
        + 8                     // start_time
        + 1                     // outcome_count
        + 1                     // status
        + 1                     // winning_outcome
        + 8 * POOL_SLOTS        // pools
        + 8 * POOL_SLOTS        // frozen_odds
        + 2                     // freeze_fee_bps
        + 8                     // settled_amount
        + 8                     // total_bets
        + 1                     // vault_bump
        + 1                     // bump
        + 64;                   // reserved

    /// Current gross pool: the sum of all outcome pools.
    pub fn total_pool(&self) -> u64 {
        self.pools
            .iter()
            .take(self.outcome_count as usize)
            .fold(0u64, |acc, stake| acc.saturating_add(*stake))
    }

    /// Number of outcomes carrying at least one lamport of stake.
    pub fn funded_outcomes(&self) -> usize {
        self.pools
            .iter()
            .take(self.outcome_count as usize)
            .filter(|stake| **stake > 0)
            .count()
    }

    /// Bounds-check a 1-based outcome index against this market's arity.
    pub fn validate_outcome(&self, outcome: u8) -> Result<()> {
        require!(
            outcome >= 1 && outcome <= self.outcome_count,
            ParimutuelError::InvalidOutcome
        );
        Ok(())
    }

    /// Full admission check for a bet, in order: market open, betting
    /// window, outcome range, minimum stake, one-bet-per-participant.
    /// Pure — nothing is mutated until this passes.
    pub fn admit_bet(
        &self,
        bet: &Bet,
        outcome: u8,
        amount: u64,
        min_stake: u64,
        now: i64,
    ) -> Result<()> {
        require!(
            self.status == MarketStatus::Open,
            ParimutuelError::MarketNotOpen
        );
        require!(now < self.start_time, ParimutuelError::BettingWindowClosed);
        self.validate_outcome(outcome)?;
        require!(amount >= min_stake, ParimutuelError::BelowMinimumStake);
        require!(!bet.is_placed(), ParimutuelError::DuplicateBet);
        Ok(())
    }

    /// Add stake to an outcome pool. The only mutation path for pools
    /// while the market is Open.
    pub fn add_stake(&mut self, outcome: u8, amount: u64) -> Result<()> {
        let slot = (outcome - 1) as usize;
        self.pools[slot] = self.pools[slot]
            .checked_add(amount)
            .ok_or(ParimutuelError::Overflow)?;
        Ok(())
    }

    /// Return a refunded stake out of its outcome pool, keeping the
    /// pools equal to the sum of non-refunded bets.
    pub fn release_stake(&mut self, outcome: u8, amount: u64) -> Result<()> {
        let slot = (outcome - 1) as usize;
        self.pools[slot] = self.pools[slot]
            .checked_sub(amount)
            .ok_or(ParimutuelError::Overflow)?;
        Ok(())
    }

    /// Advisory pre-close odds for display: gross pool over each
    /// outcome's stake. `None` where an outcome has no stake — there is
    /// no number to show, not a zero. These move with every bet and are
    /// distinct from the frozen odds used for payout.
    pub fn estimated_odds(&self) -> [Option<u64>; POOL_SLOTS] {
        let total = self.total_pool() as u128;
        let mut odds = [None; POOL_SLOTS];
        for (slot, quote) in odds.iter_mut().enumerate().take(self.outcome_count as usize) {
            let stake = self.pools[slot] as u128;
            if stake > 0 {
                let q = total * ODDS_SCALE as u128 / stake;
                *quote = Some(u64::try_from(q).unwrap_or(u64::MAX));
            }
        }
        odds
    }

    /// Close betting: the Open → Closed | Cancelled transition.
    ///
    /// Only effective once `now >= start_time`. A market whose pool is
    /// below `min_activity_pool`, or with stake on fewer than two
    /// distinct outcomes, is cancelled — a one-sided pool has no
    /// counter-risk and cannot be priced. Otherwise the odds are frozen
    /// and the market awaits its result.
    ///
    /// Returns `true` if the market was cancelled.
    pub fn close(&mut self, now: i64, min_activity_pool: u64) -> Result<bool> {
        match self.status {
            MarketStatus::Open => {}
            MarketStatus::Closed => return err!(ParimutuelError::MarketAlreadyClosed),
            MarketStatus::Resolved => return err!(ParimutuelError::MarketAlreadyResolved),
            MarketStatus::Cancelled => return err!(ParimutuelError::MarketCancelled),
        }
        require!(now >= self.start_time, ParimutuelError::MarketNotStarted);

        if self.total_pool() < min_activity_pool || self.funded_outcomes() < 2 {
            self.status = MarketStatus::Cancelled;
            return Ok(true);
        }

        self.freeze_fee_bps = fee_tier_bps(self.start_time, now);
        self.freeze_odds(self.freeze_fee_bps)?;
        self.status = MarketStatus::Closed;
        Ok(false)
    }

    /// Freeze per-outcome odds from the net pool:
    ///
    ///   net_pool = total_pool × (BPS − fee_bps) / BPS
    ///   odds[i]  = net_pool × ODDS_SCALE / pools[i]   (floor)
    ///
    /// Flooring means the sum of all gross payouts can never exceed the
    /// net pool — rounding loss stays with the platform's pool, at most
    /// one lamport per winner.
    pub fn freeze_odds(&mut self, fee_bps: u16) -> Result<()> {
        let total = self.total_pool() as u128;
        let net_pool = total
            .checked_mul((BPS_DENOMINATOR - fee_bps as u64) as u128)
            .ok_or(ParimutuelError::Overflow)?
            / BPS_DENOMINATOR as u128;

        for slot in 0..self.outcome_count as usize {
            let stake = self.pools[slot] as u128;
            if stake == 0 {
                self.frozen_odds[slot] = 0;
                continue;
            }
            let q = net_pool
                .checked_mul(ODDS_SCALE as u128)
                .ok_or(ParimutuelError::Overflow)?
                / stake;
            self.frozen_odds[slot] = q.try_into().map_err(|_| ParimutuelError::Overflow)?;
        }
        Ok(())
    }

    /// Set the authoritative result: the Closed → Resolved transition.
    /// Exactly once, never on a cancelled market.
    pub fn set_result(&mut self, outcome: u8) -> Result<()> {
        match self.status {
            MarketStatus::Closed => {}
            MarketStatus::Open => return err!(ParimutuelError::MarketNotClosed),
            MarketStatus::Resolved => return err!(ParimutuelError::MarketAlreadyResolved),
            MarketStatus::Cancelled => return err!(ParimutuelError::MarketCancelled),
        }
        self.validate_outcome(outcome)?;
        self.winning_outcome = outcome;
        self.status = MarketStatus::Resolved;
        Ok(())
    }

    /// Claim arithmetic without mutation — callers show "you would
    /// receive X" from this; `claim` transfers exactly these numbers.
    ///
    ///   gross = stake × frozen_odds[winner] / ODDS_SCALE   (floor)
    ///   fee   = ⌈max(0, gross − stake) × bet.fee_bps / BPS⌉
    ///   net   = gross − fee
    ///
    /// The fee applies to profit only, never to principal, and uses the
    /// tier locked at placement — not the market-wide freeze rate.
    /// Losing bets cannot claim; they are not refunded.
    pub fn preview_claim(&self, bet: &Bet) -> Result<ClaimBreakdown> {
        match self.status {
            MarketStatus::Resolved => {}
            MarketStatus::Cancelled => return err!(ParimutuelError::NothingToClaim),
            _ => return err!(ParimutuelError::MarketNotResolved),
        }
        require!(!bet.is_settled(), ParimutuelError::NothingToClaim);
        require!(
            bet.is_placed() && bet.outcome == self.winning_outcome,
            ParimutuelError::NothingToClaim
        );

        let odds = self.frozen_odds[(bet.outcome - 1) as usize] as u128;
        let gross = (bet.amount as u128)
            .checked_mul(odds)
            .ok_or(ParimutuelError::Overflow)?
            / ODDS_SCALE as u128;

        // A payout can legitimately be <= the stake when odds floored
        // to exactly 1×; the fee then charges nothing.
        let profit = gross.saturating_sub(bet.amount as u128);
        let fee = profit
            .checked_mul(bet.fee_bps as u128)
            .ok_or(ParimutuelError::Overflow)?
            .checked_add(BPS_DENOMINATOR as u128 - 1)
            .ok_or(ParimutuelError::Overflow)?
            / BPS_DENOMINATOR as u128;
        let net = gross - fee;

        Ok(ClaimBreakdown {
            gross: gross.try_into().map_err(|_| ParimutuelError::Overflow)?,
            fee: fee.try_into().map_err(|_| ParimutuelError::Overflow)?,
            net: net.try_into().map_err(|_| ParimutuelError::Overflow)?,
            fee_bps: bet.fee_bps,
        })
    }

    /// Refund arithmetic for a cancelled market: exactly the original
    /// stake, no fee. Single-use per bet.
    pub fn refund_amount(&self, bet: &Bet) -> Result<u64> {
        require!(
            self.status == MarketStatus::Cancelled,
            ParimutuelError::MarketNotCancelled
        );
        require!(
            bet.is_placed() && !bet.is_settled(),
            ParimutuelError::NothingToClaim
        );
        Ok(bet.amount)
    }
}

/// ─── Market Status ────────────────────────────────────────────────
///
/// Open → Closed → Resolved, or Open → Cancelled via the activity
/// check inside `close`. No transition ever returns to Open.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MarketStatus {
    /// Market is accepting bets.
    #[default]
    Open,

    /// Betting ended; odds frozen; awaiting the result.
    Closed,

    /// Result set; winners may claim. Terminal.
    Resolved,

    /// Insufficient activity at close; refunds available. Terminal.
    Cancelled,
}

/// ─── Bet Account ──────────────────────────────────────────────────
///
/// PDA: seeds = [b"bet", market.key, bettor.key]
///
/// The PDA derivation is the one-bet-per-participant-per-market
/// invariant: there is exactly one slot for this pair, and `admit_bet`
/// rejects a second placement into it. No averaging or top-up.
#[account]
#[derive(Default)]
pub struct Bet {
    /// The market this bet belongs to.
    pub market: Pubkey,

    /// The participant who placed it.
    pub bettor: Pubkey,

    /// Chosen outcome (1-based).
    pub outcome: u8,

    /// Staked lamports.
    pub amount: u64,

    /// Fee tier locked at placement. Immutable thereafter, even if the
    /// market's schedule or phase later changes.
    pub fee_bps: u16,

    /// Set by `claim`. Mutually exclusive with `refunded`.
    pub claimed: bool,

    /// Set by `refund`. Mutually exclusive with `claimed`.
    pub refunded: bool,

    /// Placement timestamp.
    pub placed_at: i64,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 32],
}

impl Bet {
    pub const SIZE: usize = DISCRIMINATOR_SIZE
        + 32                    // market
        + 32                    // bettor
        + 1                     // outcome
        + 8                     // amount
        + 2                     // fee_bps
        + 1                     // claimed
        + 1                     // refunded
        + 8                     // placed_at
        + 1                     // bump
        + 32;                   // reserved

    /// A freshly allocated bet record has zero stake; any accepted bet
    /// has at least the minimum.
    pub fn is_placed(&self) -> bool {
        self.amount > 0
    }

    /// Claimed or refunded — either way, this bet is spent.
    pub fn is_settled(&self) -> bool {
        self.claimed || self.refunded
    }
}

/// ─── Claim Breakdown ──────────────────────────────────────────────
///
/// The exact numbers `claim` would transfer, exposed for previews.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClaimBreakdown {
    /// Stake × frozen odds, before the fee.
    pub gross: u64,

    /// Fee on profit at the bet's locked tier.
    pub fee: u64,

    /// What the participant receives.
    pub net: u64,

    /// The locked tier the fee was computed with.
    pub fee_bps: u16,
}

/// ─── Global Config ────────────────────────────────────────────────
///
/// PDA: seeds = [b"config"]
///
/// Protocol-level settings and the platform fee accumulator.
#[account]
pub struct GlobalConfig {
    /// Platform operator: creates markets, sets results, withdraws fees.
    pub authority: Pubkey,

    /// Next market ID to assign.
    pub next_market_id: u64,

    /// Platform-wide minimum stake (lamports).
    pub min_stake: u64,

    /// Minimum total pool for a market to close rather than cancel.
    pub min_activity_pool: u64,

    /// Fees collected across all settlements; zeroed only by
    /// `withdraw_fees`. The lamports themselves sit in the treasury PDA.
    pub fee_balance: u64,

    /// Total markets created.
    pub total_markets: u64,

    /// Total volume accepted (lamports).
    pub total_volume: u64,

    /// Config PDA bump seed.
    pub bump: u8,

    /// Treasury PDA bump seed.
    pub treasury_bump: u8,

    /// Reserved.
    pub _reserved: [u8; 64],
}

// `[u8; 64]` has no `Default` impl, so the derive can't be used here.
impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            authority: Default::default(),
            next_market_id: Default::default(),
            min_stake: Default::default(),
            min_activity_pool: Default::default(),
            fee_balance: Default::default(),
            total_markets: Default::default(),
            total_volume: Default::default(),
            bump: Default::default(),
            treasury_bump: Default::default(),
            _reserved: [0u8; 64],
        }
    }
}

impl GlobalConfig {
    pub const SIZE: usize = DISCRIMINATOR_SIZE
        + 32                    // authority
        + 8                     // next_market_id
        + 8                     // min_stake
        + 8                     // min_activity_pool
        + 8                     // fee_balance
        + 8                     // total_markets
        + 8                     // total_volume
        + 1                     // bump
        + 1                     // treasury_bump
        + 64;                   // reserved
}
