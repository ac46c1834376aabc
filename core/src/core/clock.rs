//! Coarse wall-clock tick source
//!
//! Default seeding and `create_random_seed` mix in a coarse time value. The
//! exact value does not matter (it is entropy, not simulation time), only
//! that it is cheap and changes over time.
//!
//! CRITICAL: anything that needs reproducibility must use an explicit seed,
//! never a clock-derived one.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, truncated to i32.
///
/// Wraps roughly every 49.7 days, like the millisecond tick counters found
/// in game engines. Truncation is intentional; callers only xor or seed with
/// the value.
///
/// # Example
/// ```
/// use sim_rng_rs::core::clock;
///
/// let a = clock::tick_count();
/// let b = clock::tick_count();
/// // Coarse and monotone enough for seeding; not for measuring time.
/// let _ = (a, b);
/// ```
pub fn tick_count() -> i32 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    millis as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_count_is_nonconstant_over_time() {
        let first = tick_count();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = tick_count();
        assert_ne!(first, second, "tick_count() should advance over 5ms");
    }
}
