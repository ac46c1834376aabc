//! Generator state snapshots
//!
//! An [`RngState`] is a plain value capturing everything a generator is:
//! two indices plus the 56-entry state array. Capturing and restoring it is
//! a structural copy, so a restored generator continues its stream exactly
//! where the snapshot was taken.
//!
//! Snapshots also have a frozen wire layout for cross-process transfer and
//! golden-state fixtures: 58 sequential little-endian i32 values
//! (`inext`, `inextp`, then the array in index order), 232 bytes, no
//! padding.

use serde::{Deserialize, Serialize};

/// Number of slots in the generator's state array.
pub const SEED_ARRAY_LEN: usize = 56;

/// Size of the binary snapshot layout: 58 i32 values.
pub const STATE_BYTES: usize = (2 + SEED_ARRAY_LEN) * 4;

/// Exact captured state of a [`crate::SubtractiveRng`]
///
/// Pure data, no behavior. Holding a snapshot never aliases the live
/// generator; restoring is a total overwrite, not a merge.
///
/// # Example
/// ```
/// use sim_rng_rs::SubtractiveRng;
///
/// let mut rng = SubtractiveRng::new(42);
/// let snapshot = rng.state();
/// let first = rng.next();
///
/// rng.set_state(&snapshot);
/// assert_eq!(rng.next(), first); // stream replays from the snapshot
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub inext: i32,
    pub inextp: i32,
    #[serde(with = "seed_array_serde")]
    pub seed_array: [i32; SEED_ARRAY_LEN],
}

impl RngState {
    /// Serialize to the frozen 232-byte wire layout.
    pub fn to_bytes(&self) -> [u8; STATE_BYTES] {
        let mut bytes = [0u8; STATE_BYTES];
        bytes[0..4].copy_from_slice(&self.inext.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.inextp.to_le_bytes());
        for (i, value) in self.seed_array.iter().enumerate() {
            let offset = 8 + i * 4;
            bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Deserialize from the frozen 232-byte wire layout.
    ///
    /// Pure data decode; feeding it bytes that were not produced by
    /// [`Self::to_bytes`] yields a snapshot no generator ever had, which is
    /// a caller bug, not a decode failure.
    pub fn from_bytes(bytes: &[u8; STATE_BYTES]) -> Self {
        let read_i32 = |offset: usize| {
            let mut word = [0u8; 4];
            word.copy_from_slice(&bytes[offset..offset + 4]);
            i32::from_le_bytes(word)
        };
        let mut seed_array = [0i32; SEED_ARRAY_LEN];
        for (i, slot) in seed_array.iter_mut().enumerate() {
            *slot = read_i32(8 + i * 4);
        }
        Self {
            inext: read_i32(0),
            inextp: read_i32(4),
            seed_array,
        }
    }
}

/// serde helper for the 56-entry array (derive stops at 32 entries).
pub(crate) mod seed_array_serde {
    use super::SEED_ARRAY_LEN;
    use serde::de::{Error, SeqAccess, Visitor};
    use serde::ser::SerializeTuple;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(array: &[i32; SEED_ARRAY_LEN], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(SEED_ARRAY_LEN)?;
        for value in array {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[i32; SEED_ARRAY_LEN], D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeedArrayVisitor;

        impl<'de> Visitor<'de> for SeedArrayVisitor {
            type Value = [i32; SEED_ARRAY_LEN];

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "an array of {} i32 values", SEED_ARRAY_LEN)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut array = [0i32; SEED_ARRAY_LEN];
                for (i, slot) in array.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| A::Error::invalid_length(i, &self))?;
                }
                Ok(array)
            }
        }

        deserializer.deserialize_tuple(SEED_ARRAY_LEN, SeedArrayVisitor)
    }
}
