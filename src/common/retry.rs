// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry an async operation a bounded number of times with a constant delay
/// between attempts. The delay is not applied after the final attempt; the
/// last error is returned unchanged.
pub async fn retry_async<F, Fut, T, E>(mut op: F, attempts: usize, delay: Duration) -> Result<T, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(_) if attempt < attempts => {
                sleep(delay).await;
                attempt += 1;
                continue;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn retries_until_success() {
        let counter = AtomicUsize::new(0);
        let res: Result<u32, ()> = retry_async(
            |_| {
                let current = counter.fetch_add(1, Ordering::Relaxed);
                async move {
                    if current < 2 {
                        Err(())
                    } else {
                        Ok(7)
                    }
                }
            },
            4,
            Duration::from_millis(1),
        )
        .await;

        assert_eq!(res.unwrap(), 7);
        assert!(counter.load(Ordering::Relaxed) >= 3);
    }

    #[tokio::test]
    async fn bounded_attempts_with_constant_spacing() {
        let counter = AtomicUsize::new(0);
        let delay = Duration::from_millis(20);
        let started = Instant::now();
        let res: Result<(), u32> = retry_async(
            |attempt| {
                counter.fetch_add(1, Ordering::Relaxed);
                async move { Err(attempt as u32) }
            },
            3,
            delay,
        )
        .await;

        assert_eq!(res.unwrap_err(), 3);
        assert_eq!(counter.load(Ordering::Relaxed), 3);
        // Two inter-attempt waits for three attempts.
        assert!(started.elapsed() >= delay * 2);
    }
}
