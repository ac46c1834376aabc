//! Scoped seed override tokens
//!
//! A [`SeedToken`] temporarily takes over a generator: it captures the
//! current state, optionally applies a new seed, and restores the captured
//! state when dropped. Drop runs on every exit path, including `?` returns
//! and panic unwinds, so the prior stream always resumes exactly where it
//! left off.
//!
//! While the token is alive it mutably borrows the generator, so all draws
//! inside the scope go through the token (it derefs to the generator).

use crate::rng::state::RngState;
use crate::rng::subtractive::SubtractiveRng;
use std::ops::{Deref, DerefMut};

/// RAII guard over a temporarily reseeded generator
///
/// Created by [`SubtractiveRng::push_seed`] or
/// [`SubtractiveRng::push_state`]. A passthrough token
/// ([`SeedToken::passthrough`]) binds the generator without saving
/// anything, so dropping it restores nothing; that keeps conditional
/// overrides uniform at the call site.
///
/// # Example
/// ```
/// use sim_rng_rs::{SeedToken, SubtractiveRng};
///
/// fn spawn_decoration(rng: &mut SubtractiveRng, fixed_layout: Option<i32>) -> i32 {
///     // One code path, override applied only when requested.
///     let mut token = match fixed_layout {
///         Some(seed) => rng.push_seed(seed),
///         None => SeedToken::passthrough(rng),
///     };
///     token.next()
/// }
///
/// let mut rng = SubtractiveRng::new(42);
/// let replayable = spawn_decoration(&mut rng, Some(7));
/// assert_eq!(replayable, SubtractiveRng::new(7).next());
/// // The override did not disturb rng's own stream.
/// assert_eq!(rng.next(), SubtractiveRng::new(42).next());
/// ```
pub struct SeedToken<'a> {
    rng: &'a mut SubtractiveRng,
    saved: Option<RngState>,
}

impl<'a> SeedToken<'a> {
    /// Token that restores `saved` into `rng` on drop.
    pub(crate) fn restoring(rng: &'a mut SubtractiveRng, saved: RngState) -> Self {
        Self {
            rng,
            saved: Some(saved),
        }
    }

    /// Bind a generator without capturing anything; drop is a no-op
    ///
    /// The "do nothing" token: useful when an override is applied
    /// conditionally but the scope draws from the generator either way.
    pub fn passthrough(rng: &'a mut SubtractiveRng) -> Self {
        Self { rng, saved: None }
    }

    /// Whether dropping this token will restore a captured state.
    pub fn is_restoring(&self) -> bool {
        self.saved.is_some()
    }
}

impl Deref for SeedToken<'_> {
    type Target = SubtractiveRng;

    fn deref(&self) -> &SubtractiveRng {
        self.rng
    }
}

impl DerefMut for SeedToken<'_> {
    fn deref_mut(&mut self) -> &mut SubtractiveRng {
        self.rng
    }
}

impl Drop for SeedToken<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.rng.set_state(&saved);
        }
    }
}
