//! Trading Engine
//!
//! Ingests raw transaction data, prices SupperCoin trades and produces
//! trade notices. The ledger is read-only here: trades are observed and
//! reported, never settled.

use crate::error::EngineResult;
use crate::notice::TradeNotice;
use crate::payload::TransferPayload;
use supper_domain::{
    Address, GenesisAllocation, Ledger, MarketCap, Price, SupplyCheck, TokenAmount,
};
use tracing::{debug, info, warn};

/// Engine over one ledger and a fixed market cap
#[derive(Debug, Clone)]
pub struct TradingEngine {
    ledger: Ledger,
    market_cap: MarketCap,
    price: Price,
}

impl TradingEngine {
    /// Engine seeded with the SupperCoin launch state
    ///
    /// 100M supply, founder 400k, liquidity pool 600k, $100 market cap.
    pub fn new() -> Self {
        Self {
            ledger: Ledger::default(),
            market_cap: MarketCap::launch(),
            price: Price::launch(),
        }
    }

    /// Engine built from a configured genesis allocation
    ///
    /// An under-allocated genesis is accepted unless `strict` is set; the
    /// unallocated remainder is logged at warn level.
    ///
    /// # Errors
    /// Returns `EngineError::Domain` if the genesis fails validation
    pub fn with_genesis(
        genesis: &GenesisAllocation,
        market_cap: MarketCap,
        strict: bool,
    ) -> EngineResult<Self> {
        let ledger = Ledger::new(genesis, strict)?;

        if let SupplyCheck::Unallocated { remainder } = ledger.supply_check() {
            warn!(
                supply = %ledger.token_supply(),
                allocated = %ledger.allocated(),
                unallocated = %remainder,
                "Genesis balances do not cover the token supply"
            );
        }

        let price = market_cap.price_per_token(ledger.token_supply())?;

        info!(
            supply = %ledger.token_supply(),
            holders = ledger.holder_count(),
            market_cap = %market_cap,
            price = %price,
            "Trading engine ready"
        );

        Ok(Self {
            ledger,
            market_cap,
            price,
        })
    }

    /// Ingest raw transaction data
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Data does not carry the SupperCoin transfer marker
    /// * `Ok(Some(notice))` - A transfer was recognised and priced
    ///
    /// # Errors
    /// Returns `EngineError::Payload` when the marker is present but the
    /// fields do not fit the transfer schema
    pub fn process_transaction(&self, tx_data: &str) -> EngineResult<Option<TradeNotice>> {
        let payload = match TransferPayload::detect(tx_data) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(len = tx_data.len(), "No SupperCoin marker, ignoring");
                return Ok(None);
            },
            Err(e) => {
                warn!(error = %e, tx_data, "Rejected SupperCoin payload");
                return Err(e.into());
            },
        };

        Ok(Some(self.execute_trade(payload.amount, payload.from)))
    }

    /// Price a trade and report it
    ///
    /// Balances are left untouched.
    pub fn execute_trade(&self, amount: TokenAmount, from: Address) -> TradeNotice {
        let price = self.calculate_price();
        let notice = TradeNotice::new(amount, price, from);

        info!(
            amount = %notice.amount,
            price = %notice.price,
            from = %notice.from,
            "{}",
            notice
        );

        notice
    }

    /// USD price per token: market cap over total supply
    ///
    /// Constant for the lifetime of the engine.
    pub fn calculate_price(&self) -> Price {
        self.price
    }

    /// Read-only view of the ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Configured market cap
    pub fn market_cap(&self) -> MarketCap {
        self.market_cap
    }
}

impl Default for TradingEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::payload::{PayloadError, PayloadField};
    use rust_decimal_macros::dec;
    use supper_domain::{Allocation, DomainError, FOUNDER_ADDRESS};

    fn founder() -> Address {
        Address::new(FOUNDER_ADDRESS).unwrap()
    }

    fn balances(engine: &TradingEngine) -> Vec<(Address, TokenAmount)> {
        let mut entries: Vec<_> = engine
            .ledger()
            .holders()
            .map(|(a, b)| (a.clone(), *b))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_reference_trade() {
        let engine = TradingEngine::new();

        let notice = engine
            .process_transaction("OP_RETURN|TRANSFER|SUPPERCOIN|500|bc1qxyz")
            .unwrap()
            .unwrap();

        assert_eq!(notice.amount, TokenAmount::from_units(500));
        assert_eq!(notice.price.as_decimal(), dec!(0.000001));
        assert_eq!(notice.from.as_str(), "bc1qxyz");
        assert_eq!(notice.to_string(), "Trade: 500 SUPPERCOIN at $0.000001 from bc1qxyz");
    }

    #[test]
    fn test_unmarked_data_is_noop() {
        let engine = TradingEngine::new();

        for raw in ["", "OP_RETURN|HELLO", "TRANSFER|BITCOIN|1|a", "SUPPERCOIN"] {
            assert_eq!(engine.process_transaction(raw).unwrap(), None);
        }
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let engine = TradingEngine::new();

        let err = engine
            .process_transaction("OP_RETURN|TRANSFER|SUPPERCOIN|500")
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::Payload(PayloadError::MissingField(PayloadField::FromAddress))
        );
    }

    #[test]
    fn test_price_is_constant() {
        let engine = TradingEngine::new();
        let first = engine.calculate_price();

        for _ in 0..10 {
            engine.process_transaction("OP_RETURN|TRANSFER|SUPPERCOIN|1|bc1qxyz").unwrap();
            assert_eq!(engine.calculate_price(), first);
        }
        assert_eq!(first.as_decimal(), dec!(0.000001));
        assert_eq!(first.to_string(), "0.000001");
    }

    #[test]
    fn test_engines_are_independent() {
        let a = TradingEngine::new();
        let b = TradingEngine::new();

        a.process_transaction("OP_RETURN|TRANSFER|SUPPERCOIN|999|LIQUIDITY_POOL").unwrap();

        for engine in [&a, &b] {
            assert_eq!(engine.ledger().balance_of(&founder()), TokenAmount::from_units(400_000));
            assert_eq!(
                engine.ledger().balance_of(&Address::liquidity_pool()),
                TokenAmount::from_units(600_000)
            );
        }
        assert_eq!(balances(&a), balances(&b));
    }

    #[test]
    fn test_balances_never_change() {
        let engine = TradingEngine::new();
        let before = balances(&engine);

        let inputs = [
            "OP_RETURN|TRANSFER|SUPPERCOIN|500|bc1qxyz",
            "OP_RETURN|TRANSFER|SUPPERCOIN|400000|bcrt1qfqxkaxkjkjwg20smyr0qf79gkx3ktnapl03e7r",
            "OP_RETURN|TRANSFER|SUPPERCOIN|600000|LIQUIDITY_POOL",
            "OP_RETURN|TRANSFER|SUPPERCOIN|oops|LIQUIDITY_POOL",
            "OP_RETURN|TRANSFER|SUPPERCOIN",
            "unrelated",
        ];
        for raw in inputs {
            let _ = engine.process_transaction(raw);
        }

        assert_eq!(balances(&engine), before);
        assert!(engine.ledger().orders().is_empty());
    }

    #[test]
    fn test_execute_trade_direct() {
        let engine = TradingEngine::new();
        let notice = engine.execute_trade(TokenAmount::from_units(3), founder());

        assert_eq!(notice.price, engine.calculate_price());
        assert_eq!(notice.from, founder());
    }

    #[test]
    fn test_with_genesis_custom_market_cap() {
        let genesis = GenesisAllocation::new(
            TokenAmount::from_units(1_000_000),
            vec![
                Allocation::new(founder(), TokenAmount::from_units(400_000)),
                Allocation::new(Address::liquidity_pool(), TokenAmount::from_units(600_000)),
            ],
        );
        let engine =
            TradingEngine::with_genesis(&genesis, MarketCap::launch(), true).unwrap();

        assert_eq!(engine.calculate_price().as_decimal(), dec!(0.0001));
        assert!(engine.ledger().supply_check().is_exact());
    }

    #[test]
    fn test_with_genesis_matches_default_engine() {
        let engine = TradingEngine::with_genesis(
            &GenesisAllocation::supperchain_default(),
            MarketCap::launch(),
            false,
        )
        .unwrap();

        assert_eq!(engine.calculate_price(), TradingEngine::new().calculate_price());
        assert_eq!(balances(&engine), balances(&TradingEngine::new()));
    }

    #[test]
    fn test_with_genesis_strict_rejects_default() {
        let err = TradingEngine::with_genesis(
            &GenesisAllocation::supperchain_default(),
            MarketCap::launch(),
            true,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::Domain(DomainError::SupplyMismatch { .. })));
    }
}
