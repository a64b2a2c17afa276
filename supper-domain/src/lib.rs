//! SupperCoin Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains value objects, the holder ledger, orders and chain parameters.

#![warn(clippy::all)]

// Public modules
pub mod chain;
pub mod entities;
pub mod ledger;
pub mod value_objects;

// Re-export commonly used types
pub use chain::{
    clamp_retarget_timespan, is_supperchain, ChainType, ConsensusParams, Network, PolicyParams,
    SupperchainParams, COIN,
};
pub use entities::{Order, OrderId, OrderSide, OrderStatus};
pub use ledger::{
    founder_address, Allocation, GenesisAllocation, Ledger, SupplyCheck, DEFAULT_FOUNDER_BALANCE,
    DEFAULT_LIQUIDITY_BALANCE, DEFAULT_TOKEN_SUPPLY, FOUNDER_ADDRESS,
};
pub use value_objects::{Address, DomainError, MarketCap, Price, TokenAmount};
