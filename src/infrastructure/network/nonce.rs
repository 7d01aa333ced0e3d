// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::error::AppError;
use crate::network::chain::ChainClient;
use alloy::primitives::Address;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Per-address transaction sequence allocator.
///
/// Reconciles the endpoint's pending count with a local high-water mark so a
/// stale pending view can never hand out a nonce twice. The local mark is
/// authoritative once seeded; the network value only ever pushes it forward.
pub struct NonceTracker {
    last_allocated: Mutex<HashMap<Address, u64>>,
}

impl NonceTracker {
    pub fn new() -> Self {
        Self {
            last_allocated: Mutex::new(HashMap::new()),
        }
    }

    pub async fn next_nonce(
        &self,
        chain: &dyn ChainClient,
        address: Address,
    ) -> Result<u64, AppError> {
        let pending = chain.pending_nonce(address).await?;

        let mut guard = self.last_allocated.lock().await;
        // First allocation for an address takes the pending count as-is;
        // afterwards the network view can only push the mark forward.
        let next = match guard.get(&address).copied() {
            Some(last) => pending.max(last.saturating_add(1)),
            None => pending,
        };
        guard.insert(address, next);
        Ok(next)
    }
}

impl Default for NonceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::chain::FeeEstimate;
    use alloy::primitives::{B256, U256};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    struct ScriptedChain {
        pending: StdMutex<Vec<u64>>,
    }

    impl ScriptedChain {
        fn new(counts: Vec<u64>) -> Self {
            Self {
                pending: StdMutex::new(counts),
            }
        }
    }

    #[async_trait]
    impl ChainClient for ScriptedChain {
        async fn native_balance(&self, _owner: Address) -> Result<U256, AppError> {
            Ok(U256::ZERO)
        }
        async fn pending_nonce(&self, _owner: Address) -> Result<u64, AppError> {
            let mut counts = self.pending.lock().unwrap();
            if counts.len() > 1 {
                Ok(counts.remove(0))
            } else {
                Ok(counts[0])
            }
        }
        async fn token_balance(&self, _token: Address, _owner: Address) -> Result<U256, AppError> {
            Ok(U256::ZERO)
        }
        async fn allowance(
            &self,
            _token: Address,
            _owner: Address,
            _spender: Address,
        ) -> Result<U256, AppError> {
            Ok(U256::ZERO)
        }
        async fn fee_estimate(&self) -> Result<FeeEstimate, AppError> {
            Ok(FeeEstimate::default())
        }
        async fn submit_raw(&self, _raw: Vec<u8>) -> Result<(), AppError> {
            Ok(())
        }
        async fn await_inclusion(&self, _hash: B256) -> Result<bool, AppError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn nonces_strictly_increase_when_pending_view_lags() {
        // Endpoint keeps reporting 5 while three transactions are built
        // back-to-back without confirmations in between.
        let chain = ScriptedChain::new(vec![5, 5, 5]);
        let tracker = NonceTracker::new();
        let address = Address::from([1u8; 20]);

        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(tracker.next_nonce(&chain, address).await.unwrap());
        }
        assert_eq!(seen, vec![5, 6, 7]);
    }

    #[tokio::test]
    async fn nonces_survive_a_regressing_pending_count() {
        let chain = ScriptedChain::new(vec![9, 7, 8, 6]);
        let tracker = NonceTracker::new();
        let address = Address::from([2u8; 20]);

        let mut previous = None;
        for _ in 0..4 {
            let nonce = tracker.next_nonce(&chain, address).await.unwrap();
            if let Some(p) = previous {
                assert!(nonce > p, "nonce {nonce} not above {p}");
            }
            previous = Some(nonce);
        }
    }

    #[tokio::test]
    async fn pending_jump_ahead_is_adopted() {
        // Another source moved the account forward; the tracker follows.
        let chain = ScriptedChain::new(vec![3, 20, 20]);
        let tracker = NonceTracker::new();
        let address = Address::from([3u8; 20]);

        assert_eq!(tracker.next_nonce(&chain, address).await.unwrap(), 3);
        assert_eq!(tracker.next_nonce(&chain, address).await.unwrap(), 20);
        assert_eq!(tracker.next_nonce(&chain, address).await.unwrap(), 21);
    }

    #[tokio::test]
    async fn addresses_are_tracked_independently() {
        let chain = ScriptedChain::new(vec![0]);
        let tracker = NonceTracker::new();
        let a = Address::from([4u8; 20]);
        let b = Address::from([5u8; 20]);

        assert_eq!(tracker.next_nonce(&chain, a).await.unwrap(), 0);
        assert_eq!(tracker.next_nonce(&chain, b).await.unwrap(), 0);
        assert_eq!(tracker.next_nonce(&chain, a).await.unwrap(), 1);
        assert_eq!(tracker.next_nonce(&chain, b).await.unwrap(), 1);
    }
}
