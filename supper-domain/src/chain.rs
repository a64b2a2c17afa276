//! Supperchain Network Parameters
//!
//! Chain selection, network magic, and the consensus and relay-policy
//! constants of the Supperchain networks. Pure data plus the subsidy
//! schedule and retarget clamp that follow from it.

use crate::value_objects::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One coin in base units
pub const COIN: u64 = 100_000_000;

// =============================================================================
// ChainType
// =============================================================================

/// Chain a node is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    /// Main network
    Main,
    /// Public test network
    Testnet,
    /// Signet
    Signet,
    /// Local regression test network
    Regtest,
    /// The Supperchain network
    Supperchain,
}

impl ChainType {
    /// All chain types
    pub const ALL: [ChainType; 5] = [
        ChainType::Main,
        ChainType::Testnet,
        ChainType::Signet,
        ChainType::Regtest,
        ChainType::Supperchain,
    ];

    /// Short name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainType::Main => "main",
            ChainType::Testnet => "test",
            ChainType::Signet => "signet",
            ChainType::Regtest => "regtest",
            ChainType::Supperchain => "supperchain",
        }
    }

    /// Network magic for chains that have Supperchain parameters
    pub fn network(&self) -> Option<Network> {
        match self {
            ChainType::Supperchain => Some(Network::Mainnet),
            ChainType::Testnet => Some(Network::Testnet),
            ChainType::Regtest => Some(Network::Regtest),
            ChainType::Main | ChainType::Signet => None,
        }
    }
}

impl FromStr for ChainType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::UnknownChain(s.to_string()))
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if `chain` is the Supperchain network
pub fn is_supperchain(chain: ChainType) -> bool {
    chain == ChainType::Supperchain
}

// =============================================================================
// Network magic
// =============================================================================

/// Supperchain networks with distinct message-start bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// Message-start bytes prefixed to every P2P message
    pub fn magic(&self) -> [u8; 4] {
        match self {
            Network::Mainnet => [0xFA, 0xBF, 0xB5, 0xDA],
            Network::Testnet => [0x0F, 0x0A, 0x0B, 0x05],
            Network::Regtest => [0xDA, 0xB5, 0xBF, 0xFA],
        }
    }

    /// Magic rendered as lowercase hex
    pub fn magic_hex(&self) -> String {
        self.magic().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

// =============================================================================
// Consensus / policy
// =============================================================================

/// Consensus constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Target block interval in seconds
    pub target_spacing_secs: i64,
    /// Blocks per difficulty adjustment period
    pub difficulty_adjustment_interval: i64,
    /// Confirmations before a coinbase output is spendable
    pub coinbase_maturity: u32,
    /// Maximum money supply in base units
    pub max_money: u64,
    /// Block reward at height 0, in base units
    pub initial_block_reward: u64,
    /// Blocks between subsidy halvings
    pub subsidy_halving_interval: u64,
}

impl ConsensusParams {
    /// Expected wall-clock duration of one adjustment period
    pub fn target_timespan_secs(&self) -> i64 {
        self.target_spacing_secs * self.difficulty_adjustment_interval
    }

    /// Block subsidy at `height`, in base units
    ///
    /// The reward halves every `subsidy_halving_interval` blocks and drops
    /// to zero once it has been shifted 64 times. A zero interval yields no
    /// subsidy.
    pub fn block_subsidy(&self, height: u64) -> u64 {
        let Some(halvings) = height.checked_div(self.subsidy_halving_interval) else {
            return 0;
        };
        if halvings >= 64 {
            return 0;
        }
        self.initial_block_reward >> halvings
    }

    /// Check if `height` starts a new difficulty adjustment period
    ///
    /// Always false for a zero interval.
    pub fn is_retarget_height(&self, height: i64) -> bool {
        height.checked_rem(self.difficulty_adjustment_interval) == Some(0)
    }
}

/// Relay policy constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Maximum block weight
    pub max_block_weight: u32,
    /// Maximum weight of a standard transaction
    pub max_standard_tx_weight: u32,
    /// Minimum relay fee, sat/kB
    pub min_relay_tx_fee: u64,
    /// Dust relay fee, sat/kB
    pub dust_relay_tx_fee: u64,
}

/// Full parameter set for one Supperchain network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupperchainParams {
    pub network: Network,
    pub consensus: ConsensusParams,
    pub policy: PolicyParams,
}

impl SupperchainParams {
    /// Parameters for `network`; only the magic differs between networks
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            consensus: ConsensusParams {
                target_spacing_secs: 60,
                difficulty_adjustment_interval: 2016,
                coinbase_maturity: 100,
                max_money: 21_000_000 * COIN,
                initial_block_reward: 50 * COIN,
                subsidy_halving_interval: 210_000,
            },
            policy: PolicyParams {
                max_block_weight: 4_000_000,
                max_standard_tx_weight: 400_000,
                min_relay_tx_fee: 1_000,
                dust_relay_tx_fee: 3_000,
            },
        }
    }

    /// Parameters for `chain`, `None` for chains without Supperchain magic
    pub fn for_chain(chain: ChainType) -> Option<Self> {
        chain.network().map(Self::for_network)
    }
}

/// Clamp an observed adjustment-period timespan to `[target / 4, target * 4]`
///
/// Limits how far difficulty can move in a single retarget. A negative
/// target is treated as zero and the upper bound saturates.
pub fn clamp_retarget_timespan(actual_secs: i64, target_secs: i64) -> i64 {
    let target_secs = target_secs.max(0);
    actual_secs.clamp(target_secs / 4, target_secs.saturating_mul(4))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet() -> SupperchainParams {
        SupperchainParams::for_network(Network::Mainnet)
    }

    #[test]
    fn test_chain_type_names() {
        for chain in ChainType::ALL {
            assert_eq!(chain.as_str().parse::<ChainType>().unwrap(), chain);
        }
        assert_eq!(ChainType::Testnet.to_string(), "test");
    }

    #[test]
    fn test_unknown_chain() {
        let err = "bitcoin".parse::<ChainType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownChain("bitcoin".to_string()));
        assert_eq!(err.to_string(), "Unknown chain \"bitcoin\"");
    }

    #[test]
    fn test_is_supperchain() {
        assert!(is_supperchain(ChainType::Supperchain));
        assert!(!is_supperchain(ChainType::Main));
        assert!(!is_supperchain(ChainType::Regtest));
    }

    #[test]
    fn test_network_magic() {
        assert_eq!(Network::Mainnet.magic(), [0xFA, 0xBF, 0xB5, 0xDA]);
        assert_eq!(Network::Testnet.magic_hex(), "0f0a0b05");
        assert_eq!(Network::Regtest.magic_hex(), "dab5bffa");
    }

    #[test]
    fn test_non_supperchain_chains_have_no_params() {
        assert!(SupperchainParams::for_chain(ChainType::Signet).is_none());
        assert!(SupperchainParams::for_chain(ChainType::Main).is_none());
        assert_eq!(ChainType::Testnet.network(), Some(Network::Testnet));
        assert_eq!(ChainType::Regtest.network(), Some(Network::Regtest));
        assert_eq!(
            SupperchainParams::for_chain(ChainType::Supperchain).unwrap().network,
            Network::Mainnet
        );
    }

    #[test]
    fn test_block_subsidy_halves() {
        let consensus = mainnet().consensus;

        assert_eq!(consensus.block_subsidy(0), 50 * COIN);
        assert_eq!(consensus.block_subsidy(209_999), 50 * COIN);
        assert_eq!(consensus.block_subsidy(210_000), 25 * COIN);
        assert_eq!(consensus.block_subsidy(420_000), 1_250_000_000);
        assert_eq!(consensus.block_subsidy(64 * 210_000), 0);
    }

    #[test]
    fn test_subsidy_never_exceeds_max_money() {
        let consensus = mainnet().consensus;
        let total: u64 = (0..64u64)
            .map(|era| consensus.block_subsidy(era * 210_000) * 210_000)
            .sum();

        assert!(total <= consensus.max_money);
    }

    #[test]
    fn test_target_timespan() {
        let consensus = mainnet().consensus;
        assert_eq!(consensus.target_timespan_secs(), 120_960);
        assert!(consensus.is_retarget_height(4032));
        assert!(!consensus.is_retarget_height(4033));
    }

    #[test]
    fn test_clamp_retarget_timespan() {
        let target = 120_960;
        assert_eq!(clamp_retarget_timespan(1, target), target / 4);
        assert_eq!(clamp_retarget_timespan(target, target), target);
        assert_eq!(clamp_retarget_timespan(target * 10, target), target * 4);
    }

    #[test]
    fn test_zero_intervals_do_not_panic() {
        let mut consensus = mainnet().consensus;
        consensus.subsidy_halving_interval = 0;
        consensus.difficulty_adjustment_interval = 0;

        assert_eq!(consensus.block_subsidy(0), 0);
        assert_eq!(consensus.block_subsidy(1_000), 0);
        assert!(!consensus.is_retarget_height(0));
        assert!(!consensus.is_retarget_height(2016));
    }

    #[test]
    fn test_clamp_degenerate_targets() {
        assert_eq!(clamp_retarget_timespan(10, -100), 0);
        assert_eq!(clamp_retarget_timespan(10, 0), 0);
        assert_eq!(clamp_retarget_timespan(i64::MAX, i64::MAX), i64::MAX);
        assert_eq!(clamp_retarget_timespan(0, i64::MAX), i64::MAX / 4);
    }

    #[test]
    fn test_policy_constants() {
        let policy = mainnet().policy;
        assert_eq!(policy.max_block_weight, 4_000_000);
        assert_eq!(policy.max_standard_tx_weight, 400_000);
        assert_eq!(policy.min_relay_tx_fee, 1_000);
        assert_eq!(policy.dust_relay_tx_fee, 3_000);
    }
}
