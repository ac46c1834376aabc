//! Per-thread default generator
//!
//! One lazily created generator per thread, seeded from the coarse clock on
//! first access and never reseeded automatically. Binding the instance to
//! the thread removes cross-thread races by construction; nothing here
//! locks.
//!
//! This is a convenience for throwaway randomness only. Anything that must
//! be reproducible takes an explicitly seeded [`SubtractiveRng`] as a
//! parameter instead of reaching for this accessor.

use crate::rng::subtractive::SubtractiveRng;
use std::cell::RefCell;

thread_local! {
    static THREAD_RNG: RefCell<SubtractiveRng> = RefCell::new(SubtractiveRng::from_clock());
}

/// Run a closure against the calling thread's default generator
///
/// The generator is created on first access and keeps its state across
/// calls on the same thread.
///
/// # Example
/// ```
/// use sim_rng_rs::with_thread_rng;
///
/// let roll = with_thread_rng(|rng| rng.next_max(6)).unwrap();
/// assert!((0..6).contains(&roll));
/// ```
///
/// # Panics
/// Panics if called re-entrantly from within its own closure (the state is
/// a `RefCell`).
pub fn with_thread_rng<R>(f: impl FnOnce(&mut SubtractiveRng) -> R) -> R {
    THREAD_RNG.with(|rng| f(&mut rng.borrow_mut()))
}
