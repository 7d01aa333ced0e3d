// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use alloy::primitives::{Address, B256, U256};

/// Abbreviated `0x1234...abcd` form used throughout the activity logs.
pub fn short_address(address: Address) -> String {
    let full = format!("{address:#x}");
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

pub fn short_hash(hash: B256) -> String {
    let full = format!("{hash:#x}");
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Lossy float rendering of a token amount for logs only.
pub fn units_to_float(value: U256, decimals: u8) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let num = value.to_string().parse::<f64>().unwrap_or(0.0);
    num / scale
}
