// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::NATIVE_TOKEN;
use alloy::primitives::{Address, U256};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Randomness source for amounts, pacing and recipient choice.
///
/// Owned by the cycle engine so every draw goes through one seedable place;
/// tests construct it with [`Sampler::seeded`] for reproducible runs.
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Swap input amount in the token's smallest unit.
    ///
    /// Native side: 0.0010 to 0.0040 PHRS in 0.0001 steps.
    /// Stable side: 5.0000 to 10.0000 USDT in 0.0001 steps.
    pub fn swap_amount(&mut self, from_token: Address) -> U256 {
        if from_token == NATIVE_TOKEN {
            U256::from(self.rng.gen_range(10u64..=40)) * U256::from(100_000_000_000_000u64)
        } else {
            U256::from(self.rng.gen_range(50_000u64..=100_000) * 100)
        }
    }

    /// Native transfer amount in wei: 0.000100 to 0.000200 PHRS.
    pub fn transfer_amount(&mut self) -> U256 {
        U256::from(self.rng.gen_range(100u64..=200)) * U256::from(1_000_000_000_000u64)
    }

    /// Uniform pause drawn from the configured inter-repetition window.
    pub fn step_delay(&mut self, min: Duration, max: Duration) -> Duration {
        if max <= min {
            return min;
        }
        Duration::from_millis(self.rng.gen_range(min.as_millis() as u64..=max.as_millis() as u64))
    }

    /// Pick a transfer recipient, re-rolling until it differs from the
    /// sender. Returns `None` when the list offers no foreign address.
    pub fn recipient(&mut self, recipients: &[Address], sender: Address) -> Option<Address> {
        if recipients.iter().all(|r| *r == sender) {
            return None;
        }
        loop {
            let candidate = recipients[self.rng.gen_range(0..recipients.len())];
            if candidate != sender {
                return Some(candidate);
            }
        }
    }
}
