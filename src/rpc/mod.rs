/*
 * JSON-RPC envelopes for eth_call and receipt lookups.
 *
 * Transport is the caller's business; this module only builds request
 * bodies and unwraps response bodies.
 */

use crate::abi::TransactionReceipt;
use crate::models::{Result, TickscopeError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

impl JsonRpcRequest {
    #[must_use]
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }
}

#[must_use]
pub fn eth_call_request(id: u64, to: &str, data: &str) -> JsonRpcRequest {
    JsonRpcRequest::new(id, "eth_call", json!([{ "to": to, "data": data }, "latest"]))
}

#[must_use]
pub fn transaction_receipt_request(id: u64, tx_hash: &str) -> JsonRpcRequest {
    JsonRpcRequest::new(id, "eth_getTransactionReceipt", json!([tx_hash]))
}

pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: JsonRpcResponse<T> = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(TickscopeError::DecodeError(format!(
            "RPC error {}: {}",
            error.code, error.message
        )));
    }

    response
        .result
        .ok_or_else(|| TickscopeError::DecodeError("RPC response has no result".to_string()))
}

/// Hex return data of an `eth_call`.
pub fn parse_call_result(body: &str) -> Result<String> {
    parse_response(body)
}

pub fn parse_receipt(body: &str) -> Result<TransactionReceipt> {
    parse_response(body)
}
