// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::constants::chain_label;
use crate::common::error::AppError;
use alloy::network::Ethereum;
use alloy::providers::{Provider, RootProvider};
use std::fmt;
use url::Url;

pub type HttpProvider = RootProvider<Ethereum>;

pub struct ConnectionFactory;

impl ConnectionFactory {
    pub fn parse_endpoint(rpc_url: &str) -> Result<Url, AppError> {
        let url = Url::parse(rpc_url.trim())
            .map_err(|e| AppError::Config(format!("Invalid RPC URL: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AppError::Config(format!(
                "Unsupported RPC URL scheme `{}` (expected http or https)",
                other
            ))),
        }
    }

    pub fn http(rpc_url: &str) -> Result<HttpProvider, AppError> {
        let url = Self::parse_endpoint(rpc_url)?;
        let provider = RootProvider::new_http(url);
        Ok(provider)
    }
}

/// A live JSON-RPC session. The chain id is captured once during the handshake.
#[derive(Clone)]
pub struct Connection {
    endpoint: Url,
    provider: HttpProvider,
    chain_id: u64,
}

impl Connection {
    pub async fn connect(rpc_url: &str) -> Result<Self, AppError> {
        let endpoint = ConnectionFactory::parse_endpoint(rpc_url)?;
        let provider = ConnectionFactory::http(endpoint.as_str())?;
        Self::with_provider(endpoint, provider).await
    }

    /// Performs the `eth_chainId` handshake over an already-built provider.
    pub async fn with_provider(endpoint: Url, provider: HttpProvider) -> Result<Self, AppError> {
        let chain_id = provider.get_chain_id().await.map_err(|e| {
            AppError::Connection(format!("{}: handshake (eth_chainId) failed: {}", endpoint, e))
        })?;

        tracing::info!(
            target: "rpc",
            endpoint = %endpoint,
            chain_id,
            chain = chain_label(chain_id).unwrap_or("unknown"),
            "Connected to RPC endpoint"
        );

        Ok(Self {
            endpoint,
            provider,
            chain_id,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// Liveness probe. Never fails; transport errors read as "not connected".
    pub async fn is_connected(&self) -> bool {
        match self.provider.get_chain_id().await {
            Ok(chain_id) => {
                if chain_id != self.chain_id {
                    tracing::warn!(
                        target: "rpc",
                        expected = self.chain_id,
                        reported = chain_id,
                        "Endpoint now reports a different chain id"
                    );
                }
                true
            }
            Err(e) => {
                tracing::debug!(target: "rpc", error = %e, "Liveness probe failed");
                false
            }
        }
    }

    pub async fn latest_block_number(&self) -> Result<u64, AppError> {
        let number = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| AppError::Rpc(format!("eth_blockNumber failed: {}", e)))?;
        tracing::debug!(target: "rpc", block = number, "Fetched chain head");
        Ok(number)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint.as_str())
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
