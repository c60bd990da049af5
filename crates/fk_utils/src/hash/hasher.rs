//! [`NoOpHashState`]: forwards a single `u64` unchanged, for keys that are
//! hashes already.

use core::hash::{BuildHasher, Hasher};

/// A hasher returning the last `u64` written to it.
///
/// Other writes are folded in 8-byte little-endian words.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher(u64);

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0_u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.0 = self.0.rotate_left(5) ^ u64::from_le_bytes(word);
        }
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.0 = value;
    }
}

/// Builds [`NoOpHasher`]s; meant for [`TypeId`](core::any::TypeId) keys.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use fk_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(7_u64), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> NoOpHasher {
        NoOpHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::hash::{BuildHasher, Hasher};

    use super::{NoOpHashState, NoOpHasher};

    #[test]
    fn byte_writes_are_folded() {
        let mut a = NoOpHasher::default();
        a.write(b"abcdefghij");
        let mut b = NoOpHasher::default();
        b.write(b"abcdefghik");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn type_ids_spread() {
        let a = NoOpHashState.hash_one(TypeId::of::<u8>());
        let b = NoOpHashState.hash_one(TypeId::of::<String>());
        assert_ne!(a, b);
    }
}
