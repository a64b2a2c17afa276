//! Line runner.
//!
//! Feeds transaction data to the engine one line at a time and writes a
//! notice for every trade. Rejected payloads are logged and counted; they
//! never stop the run.

use crate::config::{Config, OutputFormat};
use crate::error::DaemonResult;
use serde::Serialize;
use std::io::{BufRead, Write};
use supper_domain::{is_supperchain, SupperchainParams};
use supper_engine::{TradeNotice, TradingEngine};
use tracing::{debug, info, warn};

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Non-blank lines read
    pub lines: u64,
    /// Lines that produced a trade notice
    pub trades: u64,
    /// Lines without the SupperCoin marker
    pub ignored: u64,
    /// Marked lines that failed validation
    pub rejected: u64,
}

/// Drives a [`TradingEngine`] over line-oriented input.
pub struct Runner {
    engine: TradingEngine,
    output: OutputFormat,
}

impl Runner {
    /// Create a runner over an existing engine.
    pub fn new(engine: TradingEngine, output: OutputFormat) -> Self {
        Self { engine, output }
    }

    /// Build the engine described by `config`.
    pub fn from_config(config: &Config) -> DaemonResult<Self> {
        match SupperchainParams::for_chain(config.chain) {
            Some(params) => info!(
                chain = %config.chain,
                supperchain = is_supperchain(config.chain),
                magic = %params.network.magic_hex(),
                target_spacing_secs = params.consensus.target_spacing_secs,
                "Chain parameters loaded"
            ),
            None => warn!(chain = %config.chain, "No Supperchain parameters for chain"),
        }

        let engine = TradingEngine::with_genesis(
            &config.engine.genesis(),
            config.engine.market_cap,
            config.engine.strict_supply,
        )?;

        Ok(Self::new(engine, config.output))
    }

    /// The engine being driven.
    pub fn engine(&self) -> &TradingEngine {
        &self.engine
    }

    /// Process every line of `input`, writing notices to `out`.
    ///
    /// Lines are split on `\n` and decoded lossily, so bytes that are not
    /// valid UTF-8 never end the run.
    ///
    /// # Errors
    /// Only I/O and serialization failures end the run early.
    pub fn run<R, W>(&self, input: R, mut out: W) -> DaemonResult<RunSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = RunSummary::default();

        // Transaction data is arbitrary bytes; undecodable sequences become
        // U+FFFD instead of failing the read.
        for (index, line) in input.split(b'\n').enumerate() {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let tx_data = line.trim();
            if tx_data.is_empty() {
                continue;
            }
            summary.lines += 1;

            match self.engine.process_transaction(tx_data) {
                Ok(Some(notice)) => {
                    summary.trades += 1;
                    self.write_notice(&mut out, &notice)?;
                },
                Ok(None) => {
                    summary.ignored += 1;
                },
                Err(e) => {
                    summary.rejected += 1;
                    warn!(line = index + 1, error = %e, "Skipping rejected line");
                },
            }
        }

        out.flush()?;
        debug!(?summary, "Input exhausted");

        Ok(summary)
    }

    fn write_notice<W: Write>(&self, out: &mut W, notice: &TradeNotice) -> DaemonResult<()> {
        match self.output {
            OutputFormat::Text => writeln!(out, "{}", notice)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, notice)?;
                writeln!(out)?;
            },
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
