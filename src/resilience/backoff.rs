//! Exponential backoff between retry rounds.

use std::time::Duration;

/// Calculate the delay before the next retry round.
///
/// Grows as `base * 2^round` and saturates at `max_ms`. `round` counts
/// completed rounds starting at 1.
pub fn backoff_delay(round: u32, base_ms: u64, max_ms: u64) -> Duration {
    if round == 0 {
        return Duration::from_millis(0);
    }

    let factor = 2u64.saturating_pow(round);
    Duration::from_millis(base_ms.saturating_mul(factor).min(max_ms))
}
