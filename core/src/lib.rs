//! Simulation RNG Core - Deterministic Subtractive Generator
//!
//! Seedable pseudo-random number generator for reproducible simulation and
//! gameplay logic. Same seed, same sequence - across processes, machines and
//! re-implementations.
//!
//! # Architecture
//!
//! - **core**: Coarse wall-clock tick source for default seeding
//! - **rng**: The subtractive generator, state snapshots, scoped seed
//!   override tokens and the per-thread default instance
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded, bit-exact arithmetic)
//! 2. Generator state is 56 i32 slots plus two indices; snapshots capture it
//!    exactly and restore it exactly
//! 3. A scoped seed override always restores the prior stream, on every exit
//!    path including panics
//!
//! NOT cryptographically secure. Do not use for anything security-sensitive.

// Module declarations
pub mod core;
pub mod rng;

// Re-exports for convenience
pub use rng::{
    instance::with_thread_rng,
    state::RngState,
    subtractive::{RngError, SubtractiveRng},
    token::SeedToken,
};
