// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use crate::common::parsing::parse_checked_address;
use crate::data::abi::InterfaceDescriptor;
use crate::network::provider::{Connection, HttpProvider};
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::primitives::{Address, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy_json_abi::StateMutability;

/// A contract address paired with its interface, ready for `eth_call`.
#[derive(Clone)]
pub struct ContractBinding {
    address: Address,
    descriptor: InterfaceDescriptor,
    provider: HttpProvider,
}

impl ContractBinding {
    /// Local construction only; nothing is sent to the endpoint.
    pub fn bind(
        connection: &Connection,
        address: &str,
        descriptor: InterfaceDescriptor,
    ) -> Result<Self, AppError> {
        let address = parse_checked_address(address)?;
        tracing::debug!(
            target: "contract",
            address = %address,
            functions = descriptor.function_count(),
            chain_id = connection.chain_id(),
            "Bound contract"
        );
        Ok(Self {
            address,
            descriptor,
            provider: connection.provider().clone(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn coerce_args(
        &self,
        function: &str,
        raw: &[String],
    ) -> Result<Vec<DynSolValue>, AppError> {
        self.descriptor.coerce_args(function, raw)
    }

    /// Encodes, sends as `eth_call` against the latest block, and decodes the outputs.
    pub async fn call_read_function(
        &self,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, AppError> {
        let func = self.descriptor.resolve(function, args)?;
        if !matches!(
            func.state_mutability,
            StateMutability::View | StateMutability::Pure
        ) {
            tracing::warn!(
                target: "contract",
                function = %func.signature(),
                "Function is state-changing; result is only a simulation via eth_call"
            );
        }

        let calldata = func
            .abi_encode_input(args)
            .map_err(|e| AppError::validation("args", format!("{}: {}", func.signature(), e)))?;
        let request = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(calldata).into());

        tracing::debug!(
            target: "contract",
            address = %self.address,
            function = %func.signature(),
            "Sending eth_call"
        );
        let output = self
            .provider
            .call(request)
            .await
            .map_err(|e| AppError::Rpc(format!("eth_call {} failed: {}", func.signature(), e)))?;

        if output.is_empty() && !func.outputs.is_empty() {
            return Err(AppError::Rpc(format!(
                "{} returned no data; is a contract deployed at {}?",
                func.signature(),
                self.address
            )));
        }

        func.abi_decode_output(&output).map_err(|e| {
            AppError::Rpc(format!(
                "could not decode {} output ({} bytes): {}",
                func.signature(),
                output.len(),
                e
            ))
        })
    }
}
