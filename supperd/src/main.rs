//! SupperCoin Daemon
//!
//! Reads transaction data from stdin, one transaction per line, and prints a
//! notice for every SupperCoin trade.
//!
//! # Usage
//!
//! ```bash
//! # Start with default configuration
//! echo 'OP_RETURN|TRANSFER|SUPPERCOIN|500|bc1qxyz' | cargo run -p supperd
//!
//! # JSON notices, verbose logs
//! SUPPER_OUTPUT=json RUST_LOG=supperd=debug cargo run -p supperd < txdata.log
//! ```
//!
//! # Environment Variables
//!
//! - `SUPPER_ENV`: Environment (test, development, production)
//! - `SUPPER_CHAIN`: Chain (main, test, signet, regtest, supperchain; default: supperchain)
//! - `SUPPER_TOKEN_SUPPLY`: Declared supply (default: 100000000)
//! - `SUPPER_MARKET_CAP_USD`: Market cap used for pricing (default: 100)
//! - `SUPPER_FOUNDER_ADDRESS`: Founder holder address
//! - `SUPPER_FOUNDER_BALANCE`: Founder balance (default: 400000)
//! - `SUPPER_LIQUIDITY_BALANCE`: Liquidity pool balance (default: 600000)
//! - `SUPPER_STRICT_SUPPLY`: Reject balances that do not sum to the supply (default: false)
//! - `SUPPER_OUTPUT`: Notice format, text or json (default: text)

use std::io;
use supperd::{Config, Runner};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries notices only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("supperd=info".parse()?)
                .add_directive("supper_engine=info".parse()?),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        chain = %config.chain,
        output = %config.output,
        "SupperCoin Daemon"
    );

    let runner = Runner::from_config(&config)?;
    let summary = runner.run(io::stdin().lock(), io::stdout().lock())?;

    info!(
        lines = summary.lines,
        trades = summary.trades,
        ignored = summary.ignored,
        rejected = summary.rejected,
        "Run complete"
    );

    Ok(())
}
