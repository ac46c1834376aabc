//! Deterministic random number generation
//!
//! Subtractive (lagged-Fibonacci) generator with exact, bit-reproducible
//! arithmetic. CRITICAL: all gameplay/simulation randomness MUST go through
//! this module, and reproducible call sites MUST use explicitly seeded
//! instances.

pub mod instance;
pub mod state;
pub mod subtractive;
pub mod token;

pub use instance::with_thread_rng;
pub use state::RngState;
pub use subtractive::{RngError, SubtractiveRng};
pub use token::SeedToken;
