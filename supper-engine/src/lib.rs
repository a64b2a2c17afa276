//! SupperCoin Engine Layer
//!
//! Pure decision logic, deterministic, no I/O.
//! Takes raw transaction data → Returns trade notices.
//!
//! # Example
//!
//! ```
//! use supper_engine::TradingEngine;
//!
//! let engine = TradingEngine::new();
//! let notice = engine
//!     .process_transaction("OP_RETURN|TRANSFER|SUPPERCOIN|500|bc1qxyz")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(notice.to_string(), "Trade: 500 SUPPERCOIN at $0.000001 from bc1qxyz");
//! ```

#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod notice;
pub mod payload;

pub use engine::TradingEngine;
pub use error::{EngineError, EngineResult};
pub use notice::{TradeNotice, TOKEN_TICKER};
pub use payload::{PayloadError, PayloadField, TransferPayload, FIELD_DELIMITER, TRANSFER_MARKER};
