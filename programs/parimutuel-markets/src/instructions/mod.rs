pub mod initialize;
pub mod create_market;
pub mod place_bet;
pub mod close_betting;
pub mod set_result;
pub mod claim;
pub mod refund;
pub mod withdraw_fees;

pub use initialize::*;
pub use create_market::*;
pub use place_bet::*;
pub use close_betting::*;
pub use set_result::*;
pub use claim::*;
pub use refund::*;
pub use withdraw_fees::*;
