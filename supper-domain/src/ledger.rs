//! Holder Ledger
//!
//! The in-memory balance table seeded from a genesis allocation.
//! Balances are fixed once the ledger is built: nothing in the engine
//! settles trades against it.

use crate::entities::Order;
use crate::value_objects::{Address, DomainError, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Founder address seeded with 40% of the circulating allocation
pub const FOUNDER_ADDRESS: &str = "bcrt1qfqxkaxkjkjwg20smyr0qf79gkx3ktnapl03e7r";

/// The founder holder address
pub fn founder_address() -> Address {
    Address(FOUNDER_ADDRESS.to_string())
}

/// Declared SupperCoin supply
pub const DEFAULT_TOKEN_SUPPLY: u64 = 100_000_000;

/// Founder balance at genesis
pub const DEFAULT_FOUNDER_BALANCE: u64 = 400_000;

/// Liquidity pool balance at genesis
pub const DEFAULT_LIQUIDITY_BALANCE: u64 = 600_000;

// =============================================================================
// Genesis Allocation
// =============================================================================

/// One seeded holder balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub address: Address,
    pub balance: TokenAmount,
}

impl Allocation {
    /// Create an allocation
    pub fn new(address: Address, balance: TokenAmount) -> Self {
        Self { address, balance }
    }
}

/// Supply and seeded balances a ledger is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    pub token_supply: TokenAmount,
    pub allocations: Vec<Allocation>,
}

/// Outcome of comparing seeded balances against the declared supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupplyCheck {
    /// Balances sum exactly to the supply
    Exact,
    /// Part of the supply is not held by anyone
    Unallocated {
        /// Supply minus the sum of balances
        remainder: TokenAmount,
    },
}

impl SupplyCheck {
    /// Check if the allocation covers the whole supply
    pub fn is_exact(&self) -> bool {
        matches!(self, SupplyCheck::Exact)
    }
}

impl GenesisAllocation {
    /// Create a genesis allocation
    pub fn new(token_supply: TokenAmount, allocations: Vec<Allocation>) -> Self {
        Self {
            token_supply,
            allocations,
        }
    }

    /// The SupperCoin launch state: 100M supply, 400k founder, 600k pool
    ///
    /// The seeded balances cover only 1M of the 100M supply.
    /// `validate` reports the gap as `SupplyCheck::Unallocated`.
    pub fn supperchain_default() -> Self {
        Self {
            token_supply: TokenAmount::from_units(DEFAULT_TOKEN_SUPPLY),
            allocations: vec![
                Allocation::new(
                    founder_address(),
                    TokenAmount::from_units(DEFAULT_FOUNDER_BALANCE),
                ),
                Allocation::new(
                    Address::liquidity_pool(),
                    TokenAmount::from_units(DEFAULT_LIQUIDITY_BALANCE),
                ),
            ],
        }
    }

    /// Sum of all seeded balances
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAmount` on decimal overflow
    pub fn allocated(&self) -> Result<TokenAmount, DomainError> {
        self.allocations
            .iter()
            .try_fold(TokenAmount::zero(), |acc, a| acc.checked_add(a.balance))
            .ok_or_else(|| DomainError::InvalidAmount("Allocation sum overflows".to_string()))
    }

    /// Validate the allocation against the declared supply
    ///
    /// # Errors
    /// - `InvalidSupply` if supply is zero
    /// - `DuplicateAllocation` if an address is seeded twice
    /// - `SupplyMismatch` if balances exceed the supply, or if they fall short
    ///   of it while `strict` is set
    pub fn validate(&self, strict: bool) -> Result<SupplyCheck, DomainError> {
        if self.token_supply.is_zero() {
            return Err(DomainError::InvalidSupply("Supply must be positive".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.allocations.len());
        for allocation in &self.allocations {
            if !seen.insert(&allocation.address) {
                return Err(DomainError::DuplicateAllocation(allocation.address.to_string()));
            }
        }

        let allocated = self.allocated()?;
        let mismatch = DomainError::SupplyMismatch {
            supply: self.token_supply,
            allocated,
        };

        match self.token_supply.checked_sub(allocated) {
            None => Err(mismatch),
            Some(remainder) if remainder.is_zero() => Ok(SupplyCheck::Exact),
            Some(_) if strict => Err(mismatch),
            Some(remainder) => Ok(SupplyCheck::Unallocated { remainder }),
        }
    }
}

impl Default for GenesisAllocation {
    fn default() -> Self {
        Self::supperchain_default()
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Ledger holds the fixed supply, holder balances and the order list
///
/// The order list is part of the engine state but nothing fills it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    token_supply: TokenAmount,
    holders: HashMap<Address, TokenAmount>,
    orders: Vec<Order>,
    supply_check: SupplyCheck,
}

impl Ledger {
    /// Build a ledger from a validated genesis allocation
    ///
    /// # Errors
    /// Propagates any `GenesisAllocation::validate` failure
    pub fn new(genesis: &GenesisAllocation, strict: bool) -> Result<Self, DomainError> {
        let supply_check = genesis.validate(strict)?;
        let holders = genesis
            .allocations
            .iter()
            .map(|a| (a.address.clone(), a.balance))
            .collect();

        Ok(Self {
            token_supply: genesis.token_supply,
            holders,
            orders: Vec::new(),
            supply_check,
        })
    }

    /// Declared token supply
    pub fn token_supply(&self) -> TokenAmount {
        self.token_supply
    }

    /// Balance of `address`, zero for unknown holders
    pub fn balance_of(&self, address: &Address) -> TokenAmount {
        self.holders.get(address).copied().unwrap_or_else(TokenAmount::zero)
    }

    /// Check if `address` has a holder entry
    pub fn is_holder(&self, address: &Address) -> bool {
        self.holders.contains_key(address)
    }

    /// Iterate over holder entries (unordered)
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &TokenAmount)> {
        self.holders.iter()
    }

    /// Number of holder entries
    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    /// Sum of all holder balances
    pub fn allocated(&self) -> TokenAmount {
        self.holders
            .values()
            .fold(TokenAmount::zero(), |acc, b| acc.checked_add(*b).unwrap_or(acc))
    }

    /// Supply not held by any holder
    pub fn unallocated(&self) -> TokenAmount {
        self.token_supply
            .checked_sub(self.allocated())
            .unwrap_or_else(TokenAmount::zero)
    }

    /// Result of the genesis supply check
    pub fn supply_check(&self) -> SupplyCheck {
        self.supply_check
    }

    /// Recorded orders
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

impl Default for Ledger {
    fn default() -> Self {
        let genesis = GenesisAllocation::supperchain_default();
        let remainder = TokenAmount::from_units(
            DEFAULT_TOKEN_SUPPLY - DEFAULT_FOUNDER_BALANCE - DEFAULT_LIQUIDITY_BALANCE,
        );
        Self {
            token_supply: genesis.token_supply,
            holders: genesis
                .allocations
                .into_iter()
                .map(|a| (a.address, a.balance))
                .collect(),
            orders: Vec::new(),
            supply_check: SupplyCheck::Unallocated { remainder },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn founder() -> Address {
        let address = Address::new(FOUNDER_ADDRESS).unwrap();
        assert_eq!(address, founder_address());
        address
    }

    #[test]
    fn test_default_ledger_seeds_two_holders() {
        let ledger = Ledger::default();

        assert_eq!(ledger.holder_count(), 2);
        assert_eq!(ledger.balance_of(&founder()), TokenAmount::from_units(400_000));
        assert_eq!(
            ledger.balance_of(&Address::liquidity_pool()),
            TokenAmount::from_units(600_000)
        );
        assert_eq!(ledger.token_supply(), TokenAmount::from_units(100_000_000));
        assert!(ledger.orders().is_empty());
    }

    #[test]
    fn test_default_matches_validated_genesis() {
        let built = Ledger::new(&GenesisAllocation::supperchain_default(), false).unwrap();
        assert_eq!(built, Ledger::default());
    }

    #[test]
    fn test_unknown_holder_has_zero_balance() {
        let ledger = Ledger::default();
        let stranger = Address::new("bc1qxyz").unwrap();

        assert!(!ledger.is_holder(&stranger));
        assert!(ledger.balance_of(&stranger).is_zero());
    }

    #[test]
    fn test_default_genesis_is_under_allocated() {
        let check = GenesisAllocation::supperchain_default().validate(false).unwrap();

        assert_eq!(
            check,
            SupplyCheck::Unallocated {
                remainder: TokenAmount::from_units(99_000_000)
            }
        );
        assert!(!check.is_exact());
    }

    #[test]
    fn test_strict_rejects_default_genesis() {
        let err = GenesisAllocation::supperchain_default().validate(true).unwrap_err();

        assert_eq!(
            err,
            DomainError::SupplyMismatch {
                supply: TokenAmount::from_units(100_000_000),
                allocated: TokenAmount::from_units(1_000_000),
            }
        );
    }

    #[test]
    fn test_exact_allocation_passes_strict() {
        let genesis = GenesisAllocation::new(
            TokenAmount::from_units(1_000_000),
            vec![
                Allocation::new(founder(), TokenAmount::from_units(400_000)),
                Allocation::new(Address::liquidity_pool(), TokenAmount::from_units(600_000)),
            ],
        );

        assert_eq!(genesis.validate(true).unwrap(), SupplyCheck::Exact);
        let ledger = Ledger::new(&genesis, true).unwrap();
        assert!(ledger.unallocated().is_zero());
    }

    #[test]
    fn test_over_allocation_always_rejected() {
        let genesis = GenesisAllocation::new(
            TokenAmount::from_units(500_000),
            vec![Allocation::new(founder(), TokenAmount::new(dec!(500000.5)).unwrap())],
        );

        assert!(matches!(
            genesis.validate(false),
            Err(DomainError::SupplyMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_supply_rejected() {
        let genesis = GenesisAllocation::new(TokenAmount::zero(), vec![]);
        assert!(matches!(genesis.validate(false), Err(DomainError::InvalidSupply(_))));
    }

    #[test]
    fn test_duplicate_allocation_rejected() {
        let genesis = GenesisAllocation::new(
            TokenAmount::from_units(1_000),
            vec![
                Allocation::new(founder(), TokenAmount::from_units(1)),
                Allocation::new(founder(), TokenAmount::from_units(2)),
            ],
        );

        assert_eq!(
            genesis.validate(false).unwrap_err(),
            DomainError::DuplicateAllocation(FOUNDER_ADDRESS.to_string())
        );
    }

    #[test]
    fn test_ledger_sums() {
        let ledger = Ledger::default();

        assert_eq!(ledger.allocated(), TokenAmount::from_units(1_000_000));
        assert_eq!(ledger.unallocated(), TokenAmount::from_units(99_000_000));
    }
}
