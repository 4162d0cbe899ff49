//! Key sequences accepted by the tree operations.
//!
//! A key sequence is an ordered run of key values addressed by position.
//! Elements may be missing (`None`) in the `Option<K>` forms; a missing
//! element is a caller error, reported as
//! [`EntryTreeError::InvalidArgument`]. An absent sequence (`None::<&S>`)
//! behaves exactly like an empty one.

use crate::error::{EntryTreeError, Result};

/// An ordered sequence of keys, any of which may be missing.
pub trait KeySeq<K> {
    /// Number of positions in the sequence, missing elements included.
    fn len(&self) -> usize;

    /// The key at `i`, or `None` if that element is missing.
    fn key_at(&self, i: usize) -> Option<&K>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> KeySeq<K> for [K] {
    #[inline]
    fn len(&self) -> usize {
        <[K]>::len(self)
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.get(i)
    }
}

impl<K> KeySeq<K> for [Option<K>] {
    #[inline]
    fn len(&self) -> usize {
        <[Option<K>]>::len(self)
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.get(i).and_then(Option::as_ref)
    }
}

impl<K, const N: usize> KeySeq<K> for [K; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.get(i)
    }
}

impl<K, const N: usize> KeySeq<K> for [Option<K>; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.get(i).and_then(Option::as_ref)
    }
}

impl<K> KeySeq<K> for Vec<K> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.get(i)
    }
}

impl<K> KeySeq<K> for Vec<Option<K>> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.get(i).and_then(Option::as_ref)
    }
}

impl<K, S: KeySeq<K> + ?Sized> KeySeq<K> for Option<&S> {
    #[inline]
    fn len(&self) -> usize {
        self.map_or(0, |s| KeySeq::<K>::len(s))
    }

    #[inline]
    fn key_at(&self, i: usize) -> Option<&K> {
        self.and_then(|s| KeySeq::<K>::key_at(s, i))
    }
}

/// Checks every position and borrows the keys in order.
///
/// Fails on the first missing element, before the caller touches the tree.
pub(crate) fn resolve<K, S: KeySeq<K> + ?Sized>(keys: &S) -> Result<Vec<&K>> {
    (0..keys.len())
        .map(|i| {
            keys.key_at(i)
                .ok_or(EntryTreeError::InvalidArgument { position: i })
        })
        .collect()
}
