// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection failed to endpoint: {0}")]
    Connection(String),

    #[error("API request to {url} failed after {attempts} attempts: {reason}")]
    Api {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("Transaction failed: {hash}, reason: {reason}")]
    Transaction { hash: String, reason: String },

    #[error("Authentication failed for {address}: {reason}")]
    Auth { address: String, reason: String },

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
