// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use alloy::primitives::Address;
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;

/// One orchestrated wallet: signing key, derived address and the proxy it is
/// bound to for every outbound call. Lives for the whole process.
pub struct Account {
    pub signer: PrivateKeySigner,
    pub address: Address,
    proxy: Option<String>,
}

impl Account {
    pub fn new(signer: PrivateKeySigner, proxy: Option<String>) -> Self {
        let address = signer.address();
        Self {
            signer,
            address,
            proxy,
        }
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// EIP-191 personal signature over a literal message, hex encoded.
    pub async fn sign_text(&self, message: &str) -> Result<String, AppError> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| AppError::Signing(e.to_string()))?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    /// Bind each signer to a proxy by index modulo pool size. Deterministic
    /// so re-runs reproduce the same account/proxy pairing.
    pub fn bind_proxies(signers: Vec<PrivateKeySigner>, proxies: &[String]) -> Vec<Account> {
        signers
            .into_iter()
            .enumerate()
            .map(|(index, signer)| {
                let proxy = if proxies.is_empty() {
                    None
                } else {
                    Some(proxies[index % proxies.len()].clone())
                };
                Account::new(signer, proxy)
            })
            .collect()
    }
}
