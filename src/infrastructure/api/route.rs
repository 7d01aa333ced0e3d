// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::api::client::ApiClient;
use crate::common::time::deadline;
use crate::domain::constants::{
    CALL_DEADLINE_SECS, CHAIN_ID, ROUTE_API_KEY, ROUTE_API_URL, ROUTE_SLIPPAGE, ROUTE_SOURCE,
};
use crate::domain::error::AppError;
use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Execution path proposed by the quoting service for one swap attempt.
/// Never cached; venue prices move between attempts.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuote {
    pub to: Address,
    pub data: Bytes,
    #[serde(default, deserialize_with = "wei_from_decimal")]
    pub value: U256,
}

#[async_trait]
pub trait RouteApi: Send + Sync {
    /// `Ok(None)` means the service answered but offered no usable route.
    async fn quote(
        &self,
        from_token: Address,
        to_token: Address,
        amount: U256,
        user: Address,
        proxy: Option<&str>,
    ) -> Result<Option<RouteQuote>, AppError>;
}

pub struct DodoRouteClient {
    api: Arc<ApiClient>,
}

impl DodoRouteClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RouteApi for DodoRouteClient {
    async fn quote(
        &self,
        from_token: Address,
        to_token: Address,
        amount: U256,
        user: Address,
        proxy: Option<&str>,
    ) -> Result<Option<RouteQuote>, AppError> {
        let url = format!(
            "{ROUTE_API_URL}?chainId={CHAIN_ID}&deadLine={}&apikey={ROUTE_API_KEY}\
             &slippage={ROUTE_SLIPPAGE}&source={ROUTE_SOURCE}\
             &toTokenAddress={}&fromTokenAddress={}&userAddr={}\
             &estimateGas=false&fromAmount={amount}",
            deadline(CALL_DEADLINE_SECS),
            to_token.to_checksum(None),
            from_token.to_checksum(None),
            user.to_checksum(None),
        );

        let response = self.api.get(&url, proxy).await?;

        let status = response.get("status").and_then(|s| s.as_i64());
        let data = response.get("data");
        if status == Some(200)
            && let Some(data) = data.filter(|d| d.is_object())
        {
            let quote: RouteQuote = serde_json::from_value(data.clone())
                .map_err(|e| AppError::Execution(format!("Malformed route payload: {e}")))?;
            return Ok(Some(quote));
        }

        let message = response
            .get("msg")
            .and_then(|m| m.as_str())
            .unwrap_or("no route in response");
        tracing::warn!(target: "route", %message, "Quoting service offered no route");
        Ok(None)
    }
}

/// The route service emits the native-value component as a decimal wei
/// string; absent or null means zero.
fn wei_from_decimal<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(U256::ZERO),
        Some(serde_json::Value::String(s)) => {
            U256::from_str_radix(s.trim(), 10).map_err(D::Error::custom)
        }
        Some(serde_json::Value::Number(n)) => {
            let as_text = n.to_string();
            U256::from_str_radix(&as_text, 10).map_err(D::Error::custom)
        }
        Some(other) => Err(D::Error::custom(format!(
            "unsupported value field: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_payload_decodes_decimal_value() {
        let raw = serde_json::json!({
            "to": "0x3541423f25a1ca5c98fdbcf478405d3f0aad1164",
            "data": "0xdeadbeef",
            "value": "10000000000000000"
        });
        let quote: RouteQuote = serde_json::from_value(raw).unwrap();
        assert_eq!(quote.value, U256::from(10_000_000_000_000_000u64));
        assert_eq!(quote.data.len(), 4);
    }

    #[test]
    fn route_payload_defaults_missing_value_to_zero() {
        let raw = serde_json::json!({
            "to": "0x3541423f25a1ca5c98fdbcf478405d3f0aad1164",
            "data": "0x"
        });
        let quote: RouteQuote = serde_json::from_value(raw).unwrap();
        assert_eq!(quote.value, U256::ZERO);
    }
}
