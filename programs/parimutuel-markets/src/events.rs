use anchor_lang::prelude::*;

// Every state mutation emits exactly one event. Off-ledger mirrors
// (display, precomputation) rebuild from this feed and never keep an
// independent copy of the settlement math.

// --- GLOBAL & ADMIN ---
#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub min_stake: u64,
    pub min_activity_pool: u64,
}

#[event]
pub struct FeesWithdrawn {
    pub authority: Pubkey,
    pub amount: u64,
}

// --- MARKET LIFECYCLE ---
#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub label: String,
    pub start_time: i64,
    pub outcome_count: u8,
}

#[event]
pub struct BettingClosed {
    pub market_id: u64,
    pub cancelled: bool,
    pub total_pool: u64,
    pub freeze_fee_bps: u16,
}

#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub winning_outcome: u8,
}

// --- BETTING ---
#[event]
pub struct BetPlaced {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub outcome: u8,
    pub amount: u64,
    pub fee_bps: u16,
}

// --- SETTLEMENT ---
#[event]
pub struct WinningsClaimed {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub gross: u64,
    pub fee: u64,
    pub net: u64,
}

#[event]
pub struct BetRefunded {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub amount: u64,
}
