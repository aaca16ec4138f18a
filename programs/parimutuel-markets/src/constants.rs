pub const SEED_CONFIG: &[u8] = b"config";
pub const SEED_MARKET: &[u8] = b"market";
pub const SEED_BET: &[u8] = b"bet";
pub const SEED_VAULT: &[u8] = b"vault";
pub const SEED_TREASURY: &[u8] = b"treasury";

/// Maximum length of a market label (bytes).
pub const MAX_LABEL_LEN: usize = 256;

/// Markets carry 2 outcomes (win/lose) or 3 (win/draw/lose).
pub const MIN_OUTCOMES: u8 = 2;
pub const MAX_OUTCOMES: u8 = 3;

/// Basis-point denominator for all percentage math.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fixed-point scale for odds multipliers (17_150 = 1.715×).
pub const ODDS_SCALE: u64 = 10_000;

/// Fee tier locked into a bet placed more than 24h before start.
pub const EARLY_FEE_BPS: u16 = 200;

/// Fee tier for bets placed within 24h of start.
pub const LATE_FEE_BPS: u16 = 300;

/// Cutoff between the early and late tiers, in seconds before start.
pub const EARLY_TIER_CUTOFF_SECS: i64 = 24 * 60 * 60;

pub const DISCRIMINATOR_SIZE: usize = 8;
