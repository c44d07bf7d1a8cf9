// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

// =============================================================================
// NETWORK DEFAULTS
// =============================================================================

/// Public Avalanche C-Chain testnet (Fuji) endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.avax-test.network/ext/bc/C/rpc";
pub const DEFAULT_CHAIN_NAME: &str = "AVAX Testnet";
pub const CHAIN_AVAX_FUJI: u64 = 43113;

// =============================================================================
// DEMO CONTRACT
// =============================================================================

/// Register contract deployed on Fuji (`getInfo` / `setInfo`).
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x25709e153c097d8C58d34B2810e8EaA09525dEDE";
pub const DEFAULT_FUNCTION: &str = "getInfo";

pub const REGISTER_ABI_JSON: &str = r#"[
  {
    "inputs": [],
    "name": "getInfo",
    "outputs": [
      { "internalType": "string", "name": "", "type": "string" }
    ],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [
      { "internalType": "string", "name": "_info", "type": "string" }
    ],
    "name": "setInfo",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
  }
]"#;

// Address encoding
pub const ADDRESS_HEX_LEN: usize = 40;

pub fn chain_label(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("Ethereum Mainnet"),
        11155111 => Some("Sepolia"),
        42161 => Some("Arbitrum One"),
        421614 => Some("Arbitrum Sepolia"),
        43114 => Some("Avalanche C-Chain"),
        CHAIN_AVAX_FUJI => Some(DEFAULT_CHAIN_NAME),
        _ => None,
    }
}
