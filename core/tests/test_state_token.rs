//! Scoped seed override tests
//!
//! The token's whole reason to exist: after an override is released, the
//! generator must continue the prior stream exactly - even when the code
//! inside the override's scope panics.

use sim_rng_rs::{SeedToken, SubtractiveRng};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Next 5 raw draws without advancing the real generator.
fn peek_five(rng: &SubtractiveRng) -> Vec<i32> {
    let mut replay = rng.clone();
    (0..5).map(|_| replay.next()).collect()
}

#[test]
fn test_override_round_trip() {
    let mut rng = SubtractiveRng::new(42);
    let expected = peek_five(&rng);

    {
        let mut token = rng.push_seed(777);
        for _ in 0..37 {
            token.next();
        }
        token.next_bytes(&mut [0u8; 4]);
        let _ = token.next_range(-10, 10);
    }

    let after: Vec<i32> = (0..5).map(|_| rng.next()).collect();
    assert_eq!(after, expected, "stream did not resume where it left off");
}

#[test]
fn test_override_restores_on_panic() {
    let mut rng = SubtractiveRng::new(42);
    let expected = peek_five(&rng);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let mut token = rng.push_seed(777);
        token.next();
        token.next();
        panic!("early exit inside the override scope");
    }));
    assert!(outcome.is_err());

    let after: Vec<i32> = (0..5).map(|_| rng.next()).collect();
    assert_eq!(after, expected, "panic unwind must still restore state");
}

#[test]
fn test_override_restores_on_early_return() {
    fn draw_or_bail(rng: &mut SubtractiveRng, bail: bool) -> Result<i32, &'static str> {
        let mut token = rng.push_seed(31337);
        token.next();
        if bail {
            return Err("bailed before the natural release point");
        }
        Ok(token.next())
    }

    let mut rng = SubtractiveRng::new(42);
    let expected = peek_five(&rng);
    assert!(draw_or_bail(&mut rng, true).is_err());
    assert_eq!(peek_five(&rng), expected);
    assert!(draw_or_bail(&mut rng, false).is_ok());
    assert_eq!(peek_five(&rng), expected);
}

#[test]
fn test_snapshot_restore_is_idempotent() {
    let mut rng = SubtractiveRng::new(8675309);
    let expected = peek_five(&rng);

    let snapshot = rng.state();
    rng.set_state(&snapshot);

    let after: Vec<i32> = (0..5).map(|_| rng.next()).collect();
    assert_eq!(after, expected);
}

#[test]
fn test_passthrough_token_is_safe_default() {
    let mut rng = SubtractiveRng::new(42);
    let first = peek_five(&rng)[0];

    let mut token = SeedToken::passthrough(&mut rng);
    assert_eq!(token.next(), first);
    drop(token);

    // The draw made through the passthrough token stays applied.
    assert_ne!(rng.next(), first);
}
