// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use alloy::dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Function, JsonAbi, Param};
use anyhow::Context;
use serde_json::Value;
use std::fs;

/// A validated contract interface. Every parameter type is known to resolve.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    abi: JsonAbi,
}

impl InterfaceDescriptor {
    pub fn new(abi: JsonAbi) -> Result<Self, AppError> {
        for function in abi.functions() {
            if function.name.trim().is_empty() {
                return Err(AppError::validation("abi", "function entry without a name"));
            }
            for param in function.inputs.iter().chain(function.outputs.iter()) {
                resolve_param(function, param)?;
            }
        }
        Ok(Self { abi })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::validation("abi", format!("invalid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Accepts a bare ABI array or an artifact object carrying an `abi` field.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let abi_value = match value {
            Value::Object(mut artifact) => artifact.remove("abi").ok_or_else(|| {
                AppError::validation("abi", "object descriptor has no `abi` field")
            })?,
            other => other,
        };
        let abi: JsonAbi = serde_json::from_value(abi_value)
            .map_err(|e| AppError::validation("abi", format!("malformed descriptor: {e}")))?;
        Self::new(abi)
    }

    pub fn load_from_file(path: &str) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ABI file {path}"))?;
        let descriptor = Self::from_json_str(&raw)?;
        tracing::info!(
            target: "contract",
            path,
            functions = descriptor.function_count(),
            "Loaded ABI"
        );
        Ok(descriptor)
    }

    pub fn function_count(&self) -> usize {
        self.abi.functions().count()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.abi.function(name).is_some()
    }

    fn overloads(&self, name: &str) -> Result<&[Function], AppError> {
        self.abi
            .function(name)
            .map(Vec::as_slice)
            .filter(|fns| !fns.is_empty())
            .ok_or_else(|| AppError::FunctionNotFound(name.to_string()))
    }

    /// Picks the first overload whose inputs accept `args`.
    pub fn resolve(&self, name: &str, args: &[DynSolValue]) -> Result<&Function, AppError> {
        let overloads = self.overloads(name)?;
        for function in overloads {
            if function.inputs.len() != args.len() {
                continue;
            }
            let accepts = function
                .inputs
                .iter()
                .zip(args)
                .all(|(param, arg)| param.resolve().is_ok_and(|ty| ty.matches(arg)));
            if accepts {
                return Ok(function);
            }
        }
        Err(AppError::validation(
            "args",
            format!(
                "no overload of {name} accepts {} argument(s) of the given types (candidates: {})",
                args.len(),
                signatures(overloads)
            ),
        ))
    }

    /// Converts textual arguments into typed values using the declared inputs.
    pub fn coerce_args(&self, name: &str, raw: &[String]) -> Result<Vec<DynSolValue>, AppError> {
        let overloads = self.overloads(name)?;
        let mut last_error = None;
        for function in overloads.iter().filter(|f| f.inputs.len() == raw.len()) {
            match coerce_inputs(function, raw) {
                Ok(values) => return Ok(values),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            AppError::validation(
                "args",
                format!(
                    "{name} takes no overload with {} argument(s) (candidates: {})",
                    raw.len(),
                    signatures(overloads)
                ),
            )
        }))
    }
}

fn resolve_param(function: &Function, param: &Param) -> Result<DynSolType, AppError> {
    param.resolve().map_err(|e| {
        AppError::validation(
            "abi",
            format!(
                "{}: parameter `{}` has unsupported type `{}`: {e}",
                function.name, param.name, param.ty
            ),
        )
    })
}

fn coerce_inputs(function: &Function, raw: &[String]) -> Result<Vec<DynSolValue>, AppError> {
    function
        .inputs
        .iter()
        .zip(raw)
        .map(|(param, text)| {
            let ty = resolve_param(function, param)?;
            ty.coerce_str(text).map_err(|e| {
                AppError::validation(
                    "args",
                    format!("`{text}` is not a valid {} for {}: {e}", param.ty, function.name),
                )
            })
        })
        .collect()
}

fn signatures(functions: &[Function]) -> String {
    functions
        .iter()
        .map(Function::signature)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable rendering of decoded return values.
pub fn render_outputs(values: &[DynSolValue]) -> String {
    match values {
        [] => "()".to_string(),
        [single] => render_value(single),
        many => format!("({})", render_list(many)),
    }
}

pub fn render_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::String(s) => s.clone(),
        other => render_nested(other),
    }
}

fn render_nested(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
        DynSolValue::Address(addr) => addr.to_checksum(None),
        DynSolValue::Function(f) => format!("0x{}", hex::encode(f.0)),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            format!("[{}]", render_list(items))
        }
        DynSolValue::Tuple(items) => format!("({})", render_list(items)),
        #[allow(unreachable_patterns)]
        other => format!("{other:?}"),
    }
}

fn render_list(items: &[DynSolValue]) -> String {
    items
        .iter()
        .map(render_nested)
        .collect::<Vec<_>>()
        .join(", ")
}
