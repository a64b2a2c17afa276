//! Trade notices emitted by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use supper_domain::{Address, Price, TokenAmount};

/// Ticker printed in notices
pub const TOKEN_TICKER: &str = "SUPPERCOIN";

/// Human-readable record of an observed trade
///
/// Renders as `Trade: <amount> SUPPERCOIN at $<price> from <fromAddress>`.
/// `observed_at` is metadata for structured output and is not part of the
/// text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeNotice {
    pub amount: TokenAmount,
    pub price: Price,
    pub from: Address,
    pub observed_at: DateTime<Utc>,
}

impl TradeNotice {
    /// Create a notice stamped with the current time
    pub fn new(amount: TokenAmount, price: Price, from: Address) -> Self {
        Self {
            amount,
            price,
            from,
            observed_at: Utc::now(),
        }
    }
}

impl fmt::Display for TradeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade: {} {} at ${} from {}",
            self.amount, TOKEN_TICKER, self.price, self.from
        )
    }
}
