//! SupperCoin Daemon Library
//!
//! Runtime around the SupperCoin trading engine.
//!
//! # Architecture
//!
//! ```text
//! stdin (transaction data) → Runner → TradingEngine → TradeNotice → stdout
//!                                          ↑
//!                                  Ledger (genesis from Config)
//! ```
//!
//! # Components
//!
//! - **Runner**: Line-oriented driver, one transaction per line
//! - **Config**: Environment-based configuration
//!
//! # Example
//!
//! ```rust
//! use supperd::{Config, Runner};
//!
//! let runner = Runner::from_config(&Config::test()).unwrap();
//! let mut out = Vec::new();
//! let summary = runner
//!     .run("OP_RETURN|TRANSFER|SUPPERCOIN|500|bc1qxyz\n".as_bytes(), &mut out)
//!     .unwrap();
//! assert_eq!(summary.trades, 1);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod runner;

// Re-exports for convenience
pub use config::{Config, EngineConfig, Environment, OutputFormat};
pub use error::{DaemonError, DaemonResult};
pub use runner::{RunSummary, Runner};
