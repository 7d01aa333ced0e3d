// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Unix deadline `secs` from now, as handed to routers and the route API.
pub fn deadline(secs: u64) -> u64 {
    current_unix().saturating_add(secs)
}
