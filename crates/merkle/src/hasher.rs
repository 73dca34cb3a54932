//! Hash functions for leaves and interior nodes
//!
//! Anything that maps a byte sequence to a 32-byte [`NodeHash`] can drive a
//! tree. The same function hashes raw leaf values and the concatenation of
//! two children:
//!
//! - leaf: `hash(value)`
//! - parent: `hash(left || right)`, where the order of `left` and `right` is
//!   decided by the [`PairOrdering`]
//!
//! [`Sha256Hasher`] is the default. [`Keccak256Hasher`], any RustCrypto
//! [`Digest`] with a 32-byte output (through [`DigestHasher`]) and plain
//! functions (through [`FnHasher`]) are also accepted.

use std::fmt;
use std::marker::PhantomData;

use alloy_primitives::keccak256;
use digest::{Digest, OutputSizeUser};
use generic_array::{GenericArray, typenum::U32};

use crate::node::{HASH_SIZE, NodeHash};
use crate::options::PairOrdering;

/// Length of the concatenation of two children
pub(crate) const PAIR_SIZE: usize = 2 * HASH_SIZE;

/// A one-way function with a fixed 32-byte output.
pub trait MerkleHasher: Send + Sync {
    /// Hash an arbitrary byte sequence. Empty input is valid.
    fn hash(&self, data: &[u8]) -> NodeHash;

    /// Hash two children into their parent.
    fn hash_pair(&self, ordering: PairOrdering, left: &NodeHash, right: &NodeHash) -> NodeHash {
        self.hash(&combine(ordering, left, right))
    }
}

/// Concatenate two children in the order given by `ordering`.
#[inline]
pub fn combine(ordering: PairOrdering, left: &NodeHash, right: &NodeHash) -> [u8; PAIR_SIZE] {
    let (first, second) = match ordering {
        PairOrdering::Sorted if right < left => (right, left),
        _ => (left, right),
    };

    let mut buf = [0u8; PAIR_SIZE];
    buf[..HASH_SIZE].copy_from_slice(first.as_bytes());
    buf[HASH_SIZE..].copy_from_slice(second.as_bytes());
    buf
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for &H {
    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        (**self).hash(data)
    }
}

/// Adapts any RustCrypto hash with a 32-byte output.
pub struct DigestHasher<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestHasher<D> {
    /// Create a new hasher
    pub const fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for DigestHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DigestHasher<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DigestHasher<D> {}

impl<D> fmt::Debug for DigestHasher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestHasher")
            .field("digest", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D> MerkleHasher for DigestHasher<D>
where
    D: Digest + OutputSizeUser<OutputSize = U32>,
{
    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        let out: GenericArray<u8, U32> = D::digest(data);
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(out.as_slice());
        NodeHash::new(bytes)
    }
}

/// SHA-256, the default hash
pub type Sha256Hasher = DigestHasher<sha2::Sha256>;

/// Keccak-256 as used by Ethereum
#[derive(Debug, Default, Clone, Copy)]
pub struct Keccak256Hasher;

impl MerkleHasher for Keccak256Hasher {
    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        NodeHash(keccak256(data))
    }
}

/// Wraps a plain function or closure as a hasher.
///
/// ```
/// use canopy_merkle::{FnHasher, MerkleHasher, NodeHash};
///
/// let xor = FnHasher(|data: &[u8]| {
///     let mut out = [0u8; 32];
///     for (i, b) in data.iter().enumerate() {
///         out[i % 32] ^= b;
///     }
///     NodeHash::new(out)
/// });
///
/// assert_eq!(xor.hash(&[]), NodeHash::zero());
/// ```
#[derive(Clone, Copy)]
pub struct FnHasher<F>(pub F);

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHasher")
    }
}

impl<F> MerkleHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> NodeHash + Send + Sync,
{
    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        (self.0)(data)
    }
}

/// Hash functions selectable at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::EnumString, strum::Display, strum::IntoStaticStr, strum::VariantNames)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// Keccak-256
    Keccak256,
}

/// A hasher chosen by [`HashAlgorithm`] at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyHasher(HashAlgorithm);

impl AnyHasher {
    /// Create a hasher for `algorithm`
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self(algorithm)
    }

    /// The selected algorithm
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.0
    }
}

impl From<HashAlgorithm> for AnyHasher {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self::new(algorithm)
    }
}

impl MerkleHasher for AnyHasher {
    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        match self.0 {
            HashAlgorithm::Sha256 => Sha256Hasher::new().hash(data),
            HashAlgorithm::Keccak256 => Keccak256Hasher.hash(data),
        }
    }
}
