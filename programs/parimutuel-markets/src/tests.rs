use crate::constants::*;
use crate::errors::ParimutuelError;
use crate::state::*;
use anchor_lang::prelude::*;

const START: i64 = 1_700_000_000;
const HOUR: i64 = 3600;

const MIN_STAKE: u64 = 10_000_000; // 0.01 SOL
const MIN_POOL: u64 = 100_000_000; // 0.1 SOL

const SOL: u64 = 1_000_000_000;

fn open_market(outcome_count: u8) -> Market {
    Market {
        market_id: 1,
        label: "Home vs Away".to_string(),
        start_time: START,
        outcome_count,
        status: MarketStatus::Open,
        ..Default::default()
    }
}

fn market_with_pools(pools: &[u64]) -> Market {
    let mut market = open_market(pools.len() as u8);
    for (slot, stake) in pools.iter().enumerate() {
        market.pools[slot] = *stake;
    }
    market
}

fn bet_on(outcome: u8, amount: u64, fee_bps: u16) -> Bet {
    Bet {
        outcome,
        amount,
        fee_bps,
        placed_at: START - 2 * HOUR,
        ..Default::default()
    }
}

fn assert_fails_with<T: std::fmt::Debug>(result: Result<T>, expected: ParimutuelError) {
    assert_eq!(result.unwrap_err(), expected.into());
}

// ─── Fee tiers ────────────────────────────────────────────────────

#[test]
fn fee_tier_is_early_beyond_24h_late_within() {
    assert_eq!(fee_tier_bps(START, START - 25 * HOUR), EARLY_FEE_BPS);
    assert_eq!(fee_tier_bps(START, START - 23 * HOUR), LATE_FEE_BPS);
    // The boundary itself is late: "more than 24 hours before" is strict.
    assert_eq!(fee_tier_bps(START, START - 24 * HOUR), LATE_FEE_BPS);
    assert_eq!(fee_tier_bps(START, START - 24 * HOUR - 1), EARLY_FEE_BPS);
    assert_eq!(fee_tier_bps(START, START), LATE_FEE_BPS);
    assert_eq!(fee_tier_bps(START, START + HOUR), LATE_FEE_BPS);
}

#[test]
fn locked_tier_survives_schedule_changes() {
    let mut market = market_with_pools(&[2 * SOL, SOL]);
    market.freeze_odds(LATE_FEE_BPS).unwrap();
    market.status = MarketStatus::Resolved;
    market.winning_outcome = 1;

    // Bet locked the early tier at placement; the market froze at the
    // late rate. The locked tier is authoritative for this bet's fee.
    let bet = bet_on(1, 2 * SOL, EARLY_FEE_BPS);
    let before = market.preview_claim(&bet).unwrap();
    assert_eq!(before.fee_bps, EARLY_FEE_BPS);

    // Moving the start time afterwards changes nothing.
    market.start_time += 48 * HOUR;
    let after = market.preview_claim(&bet).unwrap();
    assert_eq!(before, after);
}

// ─── Bet admission ────────────────────────────────────────────────

#[test]
fn admit_bet_accepts_a_valid_first_bet() {
    let market = open_market(3);
    let fresh = Bet::default();
    assert!(market
        .admit_bet(&fresh, 3, MIN_STAKE, MIN_STAKE, START - HOUR)
        .is_ok());
}

#[test]
fn admit_bet_rejects_out_of_range_outcomes() {
    let market = open_market(2);
    let fresh = Bet::default();
    assert_fails_with(
        market.admit_bet(&fresh, 0, SOL, MIN_STAKE, START - HOUR),
        ParimutuelError::InvalidOutcome,
    );
    assert_fails_with(
        market.admit_bet(&fresh, 3, SOL, MIN_STAKE, START - HOUR),
        ParimutuelError::InvalidOutcome,
    );
}

#[test]
fn admit_bet_rejects_below_minimum_stake() {
    let market = open_market(2);
    let fresh = Bet::default();
    assert_fails_with(
        market.admit_bet(&fresh, 1, MIN_STAKE - 1, MIN_STAKE, START - HOUR),
        ParimutuelError::BelowMinimumStake,
    );
}

#[test]
fn admit_bet_rejects_at_and_after_start_time() {
    let market = open_market(2);
    let fresh = Bet::default();
    assert_fails_with(
        market.admit_bet(&fresh, 1, SOL, MIN_STAKE, START),
        ParimutuelError::BettingWindowClosed,
    );
    assert_fails_with(
        market.admit_bet(&fresh, 1, SOL, MIN_STAKE, START + HOUR),
        ParimutuelError::BettingWindowClosed,
    );
}

#[test]
fn admit_bet_rejects_second_bet_regardless_of_outcome() {
    let market = open_market(3);
    let placed = bet_on(1, SOL, EARLY_FEE_BPS);
    for outcome in 1..=3u8 {
        assert_fails_with(
            market.admit_bet(&placed, outcome, SOL, MIN_STAKE, START - HOUR),
            ParimutuelError::DuplicateBet,
        );
    }
}

#[test]
fn admit_bet_rejects_non_open_markets() {
    let mut market = market_with_pools(&[SOL, SOL]);
    market.close(START, MIN_POOL).unwrap();
    let fresh = Bet::default();
    assert_fails_with(
        market.admit_bet(&fresh, 1, SOL, MIN_STAKE, START - HOUR),
        ParimutuelError::MarketNotOpen,
    );
}

// ─── Estimated odds ───────────────────────────────────────────────

#[test]
fn estimated_odds_use_gross_pool_and_skip_empty_outcomes() {
    let market = market_with_pools(&[2 * SOL, 0, SOL]);
    let odds = market.estimated_odds();
    // total 3 SOL: 3/2 = 1.5x, no quote, 3/1 = 3x
    assert_eq!(odds[0], Some(15_000));
    assert_eq!(odds[1], None);
    assert_eq!(odds[2], Some(30_000));
}

// ─── Closing & the activity check ─────────────────────────────────

#[test]
fn close_before_start_time_fails() {
    let mut market = market_with_pools(&[SOL, SOL]);
    assert_fails_with(
        market.close(START - 1, MIN_POOL),
        ParimutuelError::MarketNotStarted,
    );
    assert_eq!(market.status, MarketStatus::Open);
}

#[test]
fn close_cancels_single_funded_outcome_even_with_a_huge_pool() {
    let mut market = market_with_pools(&[50 * SOL, 0]);
    let cancelled = market.close(START, MIN_POOL).unwrap();
    assert!(cancelled);
    assert_eq!(market.status, MarketStatus::Cancelled);
    assert_eq!(market.frozen_odds, [0; POOL_SLOTS]);
}

#[test]
fn close_cancels_below_activity_threshold() {
    let mut market = market_with_pools(&[MIN_POOL / 4, MIN_POOL / 4]);
    assert!(market.close(START, MIN_POOL).unwrap());
    assert_eq!(market.status, MarketStatus::Cancelled);
}

#[test]
fn close_freezes_odds_from_the_net_pool() {
    let mut market = market_with_pools(&[SOL, 3 * SOL]);
    let cancelled = market.close(START, MIN_POOL).unwrap();
    assert!(!cancelled);
    assert_eq!(market.status, MarketStatus::Closed);
    // At the start time the late tier applies: net = 4 SOL × 0.97.
    assert_eq!(market.freeze_fee_bps, LATE_FEE_BPS);
    assert_eq!(market.frozen_odds[0], 38_800); // 3.88 / 1.0
    assert_eq!(market.frozen_odds[1], 12_933); // 3.88 / 3.0, floored
}

#[test]
fn close_is_single_shot() {
    let mut market = market_with_pools(&[SOL, 3 * SOL]);
    market.close(START, MIN_POOL).unwrap();
    assert_fails_with(
        market.close(START + HOUR, MIN_POOL),
        ParimutuelError::MarketAlreadyClosed,
    );

    let mut cancelled = market_with_pools(&[SOL, 0]);
    cancelled.close(START, MIN_POOL).unwrap();
    assert_fails_with(
        cancelled.close(START + HOUR, MIN_POOL),
        ParimutuelError::MarketCancelled,
    );
}

// ─── Resolution ───────────────────────────────────────────────────

#[test]
fn set_result_requires_a_closed_market() {
    let mut market = market_with_pools(&[SOL, SOL]);
    assert_fails_with(market.set_result(1), ParimutuelError::MarketNotClosed);

    market.close(START, MIN_POOL).unwrap();
    assert_fails_with(market.set_result(0), ParimutuelError::InvalidOutcome);
    assert_fails_with(market.set_result(3), ParimutuelError::InvalidOutcome);

    market.set_result(2).unwrap();
    assert_eq!(market.status, MarketStatus::Resolved);
    assert_eq!(market.winning_outcome, 2);

    assert_fails_with(market.set_result(1), ParimutuelError::MarketAlreadyResolved);
}

#[test]
fn set_result_rejects_cancelled_markets() {
    let mut market = market_with_pools(&[SOL, 0]);
    market.close(START, MIN_POOL).unwrap();
    assert_fails_with(market.set_result(1), ParimutuelError::MarketCancelled);
}

// ─── Claims ───────────────────────────────────────────────────────

#[test]
fn three_way_market_settles_the_worked_numbers() {
    // Home/draw/away with 2.0 / 0.5 / 1.0 SOL staked, early-tier freeze:
    // net pool = 3.5 × 0.98 = 3.43, odds = 1.715 / 6.86 / 3.43.
    let mut market = market_with_pools(&[2 * SOL, SOL / 2, SOL]);
    market.freeze_odds(EARLY_FEE_BPS).unwrap();
    assert_eq!(market.frozen_odds[0], 17_150);
    assert_eq!(market.frozen_odds[1], 68_600);
    assert_eq!(market.frozen_odds[2], 34_300);

    market.status = MarketStatus::Closed;
    market.set_result(1).unwrap();

    // The 2.0 bettor on outcome 1: gross 3.43, profit 1.43,
    // fee 2% of profit = 0.0286, net 3.4014.
    let bet = bet_on(1, 2 * SOL, EARLY_FEE_BPS);
    let breakdown = market.preview_claim(&bet).unwrap();
    assert_eq!(breakdown.gross, 3_430_000_000);
    assert_eq!(breakdown.fee, 28_600_000);
    assert_eq!(breakdown.net, 3_401_400_000);
    assert_eq!(breakdown.fee_bps, EARLY_FEE_BPS);
}

#[test]
fn losing_bets_cannot_claim_and_are_not_refunded() {
    let mut market = market_with_pools(&[SOL, 3 * SOL]);
    market.close(START, MIN_POOL).unwrap();
    market.set_result(1).unwrap();

    let loser = bet_on(2, 3 * SOL, LATE_FEE_BPS);
    assert_fails_with(market.preview_claim(&loser), ParimutuelError::NothingToClaim);
    assert_fails_with(market.refund_amount(&loser), ParimutuelError::MarketNotCancelled);
}

#[test]
fn spent_bets_cannot_claim_again() {
    let mut market = market_with_pools(&[SOL, 3 * SOL]);
    market.close(START, MIN_POOL).unwrap();
    market.set_result(1).unwrap();

    let mut bet = bet_on(1, SOL, LATE_FEE_BPS);
    market.preview_claim(&bet).unwrap();
    bet.claimed = true;
    assert_fails_with(market.preview_claim(&bet), ParimutuelError::NothingToClaim);
}

#[test]
fn claims_require_a_terminal_market() {
    let open = market_with_pools(&[SOL, SOL]);
    let bet = bet_on(1, SOL, LATE_FEE_BPS);
    assert_fails_with(open.preview_claim(&bet), ParimutuelError::MarketNotResolved);

    let mut closed = market_with_pools(&[SOL, SOL]);
    closed.close(START, MIN_POOL).unwrap();
    assert_fails_with(closed.preview_claim(&bet), ParimutuelError::MarketNotResolved);
}

#[test]
fn floored_odds_can_pay_back_less_than_the_stake_fee_free() {
    // 9_999 vs 1: the winner's odds floor below 1×. The payout dips
    // under the stake and the fee charges nothing — it never touches
    // principal.
    let mut market = market_with_pools(&[9_999, 1]);
    market.freeze_odds(LATE_FEE_BPS).unwrap();
    market.status = MarketStatus::Closed;
    market.set_result(1).unwrap();

    let bet = bet_on(1, 9_999, LATE_FEE_BPS);
    let breakdown = market.preview_claim(&bet).unwrap();
    assert!(breakdown.gross < bet.amount);
    assert_eq!(breakdown.fee, 0);
    assert_eq!(breakdown.net, breakdown.gross);
}

// ─── Refunds ──────────────────────────────────────────────────────

#[test]
fn cancelled_minimum_market_refunds_exactly_the_stake() {
    // A single bettor at the minimum: close cancels, refund returns
    // the principal, claim has nothing to pay.
    let mut market = market_with_pools(&[MIN_STAKE, 0]);
    assert!(market.close(START, MIN_POOL).unwrap());

    let mut bet = bet_on(1, MIN_STAKE, EARLY_FEE_BPS);
    assert_fails_with(market.preview_claim(&bet), ParimutuelError::NothingToClaim);
    assert_eq!(market.refund_amount(&bet).unwrap(), MIN_STAKE);

    bet.refunded = true;
    assert_fails_with(market.refund_amount(&bet), ParimutuelError::NothingToClaim);
}

#[test]
fn refunds_require_a_cancelled_market() {
    let market = market_with_pools(&[SOL, SOL]);
    let bet = bet_on(1, SOL, LATE_FEE_BPS);
    assert_fails_with(market.refund_amount(&bet), ParimutuelError::MarketNotCancelled);
}

#[test]
fn refunded_stakes_leave_the_pool() {
    let mut market = market_with_pools(&[SOL, 0]);
    market.close(START, MIN_POOL).unwrap();
    market.release_stake(1, SOL).unwrap();
    assert_eq!(market.total_pool(), 0);
}

#[test]
fn claimed_and_refunded_are_mutually_exclusive() {
    let mut market = market_with_pools(&[SOL, 0]);
    market.close(START, MIN_POOL).unwrap();

    let mut bet = bet_on(1, SOL, LATE_FEE_BPS);
    bet.claimed = true;
    assert_fails_with(market.refund_amount(&bet), ParimutuelError::NothingToClaim);
}

// ─── Conservation ─────────────────────────────────────────────────

#[test]
fn settlement_never_pays_out_more_than_the_pool() {
    // Awkward, non-round stakes to exercise the rounding directions.
    let stakes_on_winner: [u64; 3] = [2_000_000_001, 1_333_333_333, 777];
    let winner_pool: u64 = stakes_on_winner.iter().sum();
    let loser_pool: u64 = 777_777_777;

    let mut market = market_with_pools(&[winner_pool, loser_pool]);
    let total = market.total_pool();
    market.close(START, MIN_POOL).unwrap();
    market.set_result(1).unwrap();

    let mut paid_out: u64 = 0;
    let mut fees: u64 = 0;
    for (i, stake) in stakes_on_winner.iter().enumerate() {
        let tier = if i % 2 == 0 { EARLY_FEE_BPS } else { LATE_FEE_BPS };
        let breakdown = market.preview_claim(&bet_on(1, *stake, tier)).unwrap();
        assert_eq!(breakdown.gross, breakdown.net + breakdown.fee);
        paid_out += breakdown.net;
        fees += breakdown.fee;
    }

    // Net payouts + collected fees never exceed the pool; the gap is
    // the freeze fee plus rounding dust, all retained by the platform.
    assert!(paid_out + fees <= total);
}

#[test]
fn pool_total_matches_accepted_stakes() {
    let mut market = open_market(3);
    let stakes = [(1u8, 2 * SOL), (2u8, SOL / 2), (3u8, SOL), (1u8, MIN_STAKE)];
    let mut expected: u64 = 0;
    for (outcome, amount) in stakes {
        market.add_stake(outcome, amount).unwrap();
        expected += amount;
    }
    assert_eq!(market.total_pool(), expected);
    assert_eq!(market.funded_outcomes(), 3);
}
