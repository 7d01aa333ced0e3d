// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use alloy::primitives::{Address, address};

// =============================================================================
// NETWORK CONSTANTS
// =============================================================================

pub const CHAIN_ID: u64 = 688_688;
pub const DEFAULT_RPC_URL: &str = "https://testnet.dplabs-internal.com";

/// Sentinel address the route service uses for the unwrapped native asset.
pub const NATIVE_TOKEN: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");
pub const WRAPPED_NATIVE: Address = address!("3019b247381c850ab53dc0ee53bce7a07ea9155f");
pub const STABLE_TOKEN: Address = address!("d4071393f8716661958f766df660033b3d35fd29");

pub const SWAP_ROUTER: Address = address!("3541423f25a1ca5c98fdbcf478405d3f0aad1164");
pub const LP_ROUTER: Address = address!("4b177aded3b8bd1d5d747f91b9e853513838cd49");
pub const DVM_POOL: Address = address!("034c1f84eb9d56be15fbd003e4db18a988c0d4c6");

pub const NATIVE_DECIMALS: u8 = 18;
pub const STABLE_DECIMALS: u8 = 6;

pub fn token_symbol(token: Address) -> &'static str {
    if token == NATIVE_TOKEN {
        "PHRS"
    } else if token == WRAPPED_NATIVE {
        "WPHRS"
    } else if token == STABLE_TOKEN {
        "USDT"
    } else {
        "UNKNOWN"
    }
}

pub fn token_decimals(token: Address) -> u8 {
    if token == STABLE_TOKEN {
        STABLE_DECIMALS
    } else {
        NATIVE_DECIMALS
    }
}

// =============================================================================
// GAS & FEE CONSTANTS
// =============================================================================

pub const GWEI: u128 = 1_000_000_000;

pub const APPROVE_GAS_LIMIT: u64 = 300_000;
pub const SWAP_GAS_LIMIT: u64 = 500_000;
pub const LIQUIDITY_GAS_LIMIT: u64 = 600_000;
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

// Floors used when the network fee estimate comes back empty.
pub const APPROVE_MAX_FEE_FLOOR: u128 = GWEI;
pub const APPROVE_PRIORITY_FEE_FLOOR: u128 = GWEI / 2;
pub const SWAP_MAX_FEE_FLOOR: u128 = 5 * GWEI;
pub const SWAP_PRIORITY_FEE_FLOOR: u128 = GWEI;
pub const TRANSFER_MAX_FEE_FLOOR: u128 = GWEI;
pub const TRANSFER_PRIORITY_FEE_FLOOR: u128 = GWEI / 2;

// =============================================================================
// LIQUIDITY DEPOSIT CONSTANTS (protocol-fixed WPHRS/USDT ratio)
// =============================================================================

pub const LP_BASE_IN_WEI: u128 = 1_999_999_667_913_912_000;
pub const LP_QUOTE_IN_UNITS: u128 = 902_065;
pub const LP_BASE_MIN_WEI: u128 = 1_900_000_000_000_000;
pub const LP_QUOTE_MIN_UNITS: u128 = 850_000;

/// Seconds of validity given to swap routes and liquidity deposits.
pub const CALL_DEADLINE_SECS: u64 = 600;

// =============================================================================
// EXTERNAL API CONSTANTS
// =============================================================================

pub const PLATFORM_API_BASE: &str = "https://api.pharosnetwork.xyz";
pub const ROUTE_API_URL: &str = "https://api.dodoex.io/route-service/v2/widget/getdodoroute";
pub const ROUTE_API_KEY: &str = "a37546505892e1a952";
pub const ROUTE_SLIPPAGE: &str = "10.401";
pub const ROUTE_SOURCE: &str = "dodoV2AndMixWasm";

/// Fixed literal the platform expects to be signed at login.
pub const LOGIN_MESSAGE: &str = "pharos";
/// Task identifier the platform assigns to native transfers.
pub const REPORT_TASK_ID: u64 = 103;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";
pub const PLATFORM_ORIGIN: &str = "https://testnet.pharosnetwork.xyz";
pub const PLATFORM_REFERER: &str = "https://testnet.pharosnetwork.xyz/";
