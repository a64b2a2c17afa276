//! Daemon configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{DaemonError, DaemonResult};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use supper_domain::{
    founder_address, Address, Allocation, ChainType, GenesisAllocation, MarketCap, TokenAmount,
    DEFAULT_FOUNDER_BALANCE, DEFAULT_LIQUIDITY_BALANCE, DEFAULT_TOKEN_SUPPLY, FOUNDER_ADDRESS,
};

// =============================================================================
// Configuration
// =============================================================================

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Engine configuration
    pub engine: EngineConfig,

    /// Chain the transaction data comes from
    pub chain: ChainType,

    /// How notices are written
    pub output: OutputFormat,

    /// Environment (test, development, production)
    pub environment: Environment,
}

/// Engine configuration: genesis ledger and pricing.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Declared token supply
    pub token_supply: TokenAmount,
    /// USD valuation of the whole supply
    pub market_cap: MarketCap,
    /// Founder holder address
    pub founder_address: Address,
    /// Founder balance at genesis
    pub founder_balance: TokenAmount,
    /// Liquidity pool balance at genesis
    pub liquidity_balance: TokenAmount,
    /// Reject a genesis whose balances do not sum to the supply
    pub strict_supply: bool,
}

/// Notice output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Trade: ...` lines
    Text,
    /// One JSON object per line
    Json,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> DaemonResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> DaemonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Self::load_environment(&var)?;
        let chain = Self::load_chain(&var)?;
        let output = Self::load_output(&var)?;
        let engine = Self::load_engine_config(&var)?;

        Ok(Self {
            engine,
            chain,
            output,
            environment,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            environment: Environment::Test,
            ..Self::default()
        }
    }

    fn load_environment<F>(var: &F) -> DaemonResult<Environment>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_str = var("SUPPER_ENV").unwrap_or_else(|| "development".to_string());

        match env_str.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(DaemonError::Config(format!(
                "Invalid SUPPER_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }

    fn load_chain<F>(var: &F) -> DaemonResult<ChainType>
    where
        F: Fn(&str) -> Option<String>,
    {
        match var("SUPPER_CHAIN") {
            Some(val) => ChainType::from_str(&val.to_lowercase())
                .map_err(|e| DaemonError::Config(format!("Invalid SUPPER_CHAIN: {}", e))),
            None => Ok(ChainType::Supperchain),
        }
    }

    fn load_output<F>(var: &F) -> DaemonResult<OutputFormat>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output = var("SUPPER_OUTPUT").unwrap_or_else(|| "text".to_string());

        match output.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(DaemonError::Config(format!(
                "Invalid SUPPER_OUTPUT: {}. Expected: text, json",
                other
            ))),
        }
    }

    fn load_engine_config<F>(var: &F) -> DaemonResult<EngineConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_supply = Self::load_amount(var, "SUPPER_TOKEN_SUPPLY", DEFAULT_TOKEN_SUPPLY)?;
        let founder_balance =
            Self::load_amount(var, "SUPPER_FOUNDER_BALANCE", DEFAULT_FOUNDER_BALANCE)?;
        let liquidity_balance =
            Self::load_amount(var, "SUPPER_LIQUIDITY_BALANCE", DEFAULT_LIQUIDITY_BALANCE)?;

        let market_cap = Self::load_decimal(var, "SUPPER_MARKET_CAP_USD", Decimal::from(100))?;
        let market_cap = MarketCap::new(market_cap)
            .map_err(|e| DaemonError::Config(format!("Invalid SUPPER_MARKET_CAP_USD: {}", e)))?;

        let founder_address = var("SUPPER_FOUNDER_ADDRESS")
            .unwrap_or_else(|| FOUNDER_ADDRESS.to_string());
        let founder_address = Address::new(founder_address)
            .map_err(|e| DaemonError::Config(format!("Invalid SUPPER_FOUNDER_ADDRESS: {}", e)))?;

        let strict_supply = match var("SUPPER_STRICT_SUPPLY") {
            Some(val) => parse_bool(&val).ok_or_else(|| {
                DaemonError::Config(format!("Invalid SUPPER_STRICT_SUPPLY value: {}", val))
            })?,
            None => false,
        };

        Ok(EngineConfig {
            token_supply,
            market_cap,
            founder_address,
            founder_balance,
            liquidity_balance,
            strict_supply,
        })
    }

    fn load_decimal<F>(var: &F, key: &str, default: Decimal) -> DaemonResult<Decimal>
    where
        F: Fn(&str) -> Option<String>,
    {
        match var(key) {
            Some(val) => Decimal::from_str(val.trim())
                .map_err(|_| DaemonError::Config(format!("Invalid {} value: {}", key, val))),
            None => Ok(default),
        }
    }

    fn load_amount<F>(var: &F, key: &str, default: u64) -> DaemonResult<TokenAmount>
    where
        F: Fn(&str) -> Option<String>,
    {
        match var(key) {
            Some(val) => TokenAmount::from_str(&val)
                .map_err(|_| DaemonError::Config(format!("Invalid {} value: {}", key, val))),
            None => Ok(TokenAmount::from_units(default)),
        }
    }
}

impl EngineConfig {
    /// Genesis allocation described by this configuration.
    pub fn genesis(&self) -> GenesisAllocation {
        GenesisAllocation::new(
            self.token_supply,
            vec![
                Allocation::new(self.founder_address.clone(), self.founder_balance),
                Allocation::new(Address::liquidity_pool(), self.liquidity_balance),
            ],
        )
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                token_supply: TokenAmount::from_units(DEFAULT_TOKEN_SUPPLY),
                market_cap: MarketCap::launch(),
                founder_address: founder_address(),
                founder_balance: TokenAmount::from_units(DEFAULT_FOUNDER_BALANCE),
                liquidity_balance: TokenAmount::from_units(DEFAULT_LIQUIDITY_BALANCE),
                strict_supply: false,
            },
            chain: ChainType::Supperchain,
            output: OutputFormat::Text,
            environment: Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
