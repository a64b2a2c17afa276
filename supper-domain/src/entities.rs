//! Domain Entities for SupperCoin
//!
//! Orders carry identity and a status. The ledger keeps a list of them,
//! although the trading engine only logs trades and never books one.

use crate::value_objects::{Address, Price, TokenAmount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an Order
pub type OrderId = Uuid;

// =============================================================================
// Order
// =============================================================================

/// OrderSide represents the order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy SUPPERCOIN
    Buy,
    /// Sell SUPPERCOIN
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Resting, not yet matched
    Open,
    /// Matched in full
    Filled,
    /// Withdrawn before matching
    Cancelled,
}

impl OrderStatus {
    /// Check if no further transition is possible
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// A limit order for SUPPERCOIN priced in USD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub owner: Address,
    pub side: OrderSide,
    pub amount: TokenAmount,
    pub limit_price: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new open limit order
    pub fn new_limit(owner: Address, side: OrderSide, amount: TokenAmount, limit_price: Price) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner,
            side,
            amount,
            limit_price,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        }
    }

    /// Check if the order is still resting
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

// =============================================================================
// Tests
// =============================================================================
