//! Value Objects for the SupperCoin Domain
//!
//! Immutable, validated domain primitives.
//! All value objects enforce invariants at construction time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Address must be a non-empty holder key
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Token amount must be a non-negative decimal
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Price must be non-negative
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Token supply must be positive
    #[error("Invalid supply: {0}")]
    InvalidSupply(String),

    /// Market cap must be positive
    #[error("Invalid market cap: {0}")]
    InvalidMarketCap(String),

    /// Seeded balances disagree with the declared supply
    #[error("Supply mismatch: supply {supply}, allocated {allocated}")]
    SupplyMismatch {
        /// Declared token supply
        supply: TokenAmount,
        /// Sum of all seeded balances
        allocated: TokenAmount,
    },

    /// The same address appears twice in a genesis allocation
    #[error("Duplicate allocation for address: {0}")]
    DuplicateAllocation(String),

    /// Chain name not recognised
    #[error("Unknown chain \"{0}\"")]
    UnknownChain(String),
}

// =============================================================================
// Address
// =============================================================================

/// Address is the key of a holder entry (a Bitcoin address or a sentinel)
///
/// # Invariants
/// - Must be non-empty
/// - Must not contain whitespace or the `|` payload delimiter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub(crate) String);

impl Address {
    /// Sentinel key holding the liquidity pool balance
    pub const LIQUIDITY_POOL: &'static str = "LIQUIDITY_POOL";

    /// Create a new Address with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAddress` if the value is empty or contains
    /// whitespace or `|`
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::InvalidAddress("Address must be non-empty".to_string()));
        }
        if value.chars().any(|c| c.is_whitespace() || c == '|') {
            return Err(DomainError::InvalidAddress(format!(
                "Address contains forbidden characters: {:?}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// The liquidity pool sentinel address
    pub fn liquidity_pool() -> Self {
        Self(Self::LIQUIDITY_POOL.to_string())
    }

    /// Check if this is the liquidity pool sentinel
    pub fn is_liquidity_pool(&self) -> bool {
        self.0 == Self::LIQUIDITY_POOL
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TokenAmount
// =============================================================================

/// TokenAmount represents a count of SupperCoin units
///
/// # Invariants
/// - Must be >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(Decimal);

impl TokenAmount {
    /// Create a new TokenAmount with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAmount` if value < 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidAmount(format!("Amount must be non-negative: {}", value)));
        }
        Ok(Self(value))
    }

    /// Whole-unit amount
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Zero tokens
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two amounts, `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtract, `None` if the result would be negative
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        if other.0 > self.0 {
            return None;
        }
        self.0.checked_sub(other.0).map(Self)
    }
}

impl FromStr for TokenAmount {
    type Err = DomainError;

    /// Parse a plain decimal (`500`, `12.5`); scale is preserved
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| DomainError::InvalidAmount(format!("Not a decimal number: {:?}", s)))?;
        Self::new(value)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Price
// =============================================================================

/// Price represents a USD price per token
///
/// # Invariants
/// - Must be >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPrice` if value < 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidPrice("Price must be non-negative".to_string()));
        }
        Ok(Self(value))
    }

    /// Launch price: $100 market cap over 100M tokens
    pub fn launch() -> Self {
        Self(Decimal::new(1, 6))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// MarketCap
// =============================================================================

/// MarketCap is the notional USD valuation of the whole token supply
///
/// # Example
///
/// ```
/// # use supper_domain::value_objects::{MarketCap, TokenAmount};
/// # use rust_decimal_macros::dec;
/// let cap = MarketCap::new(dec!(100)).unwrap();
/// let price = cap.price_per_token(TokenAmount::from_units(100_000_000)).unwrap();
/// assert_eq!(price.as_decimal(), dec!(0.000001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCap(Decimal);

impl MarketCap {
    /// Create a new MarketCap with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidMarketCap` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidMarketCap("Market cap must be positive".to_string()));
        }
        Ok(Self(value))
    }

    /// The $100 valuation SupperCoin launched with
    pub fn launch() -> Self {
        Self(Decimal::from(100))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Price per token when the cap is spread over `supply`
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSupply` if supply is zero, or
    /// `DomainError::InvalidPrice` if the quotient overflows `Decimal`
    pub fn price_per_token(&self, supply: TokenAmount) -> Result<Price, DomainError> {
        if supply.is_zero() {
            return Err(DomainError::InvalidSupply("Supply must be positive".to_string()));
        }
        let price = self.0.checked_div(supply.as_decimal()).ok_or_else(|| {
            DomainError::InvalidPrice(format!(
                "Market cap {} over supply {} is out of range",
                self.0, supply
            ))
        })?;
        Price::new(price.normalize())
    }
}

impl fmt::Display for MarketCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
