// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Password to key derivation.
//!
//! 1. The password is hashed with SHA-256.
//! 2. The digest is expanded into a permutation of `0..128` by drawing
//!    from a shrinking pool, once per digest byte, over 4 bit-rotated
//!    rounds ([`extend_key`]).
//! 3. An identity index matrix is pushed through the permutation network
//!    with that permutation, giving a much longer permutation
//!    ([`build_derived_key`]).

use std::ops::Deref;

use ndarray::Array2;
use sha2::{Digest as _, Sha256};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ScrambleError};
use crate::network::{permute, Direction};

/// Length of the password digest.
pub const DIGEST_LEN: usize = 32;

/// Number of passes over the digest when extending it.
pub const ROUNDS: u32 = 4;

/// Length of the extended key. Every pool entry is drawn exactly once.
pub const EXTENDED_KEY_LEN: usize = DIGEST_LEN * ROUNDS as usize;

pub type Digest = [u8; DIGEST_LEN];

/// A permutation of `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<usize>);

impl Key {
    /// Wrap `entries`, checking that they form a permutation.
    pub fn new(entries: Vec<usize>) -> Result<Self> {
        let len = entries.len();
        let mut seen = vec![false; len];
        for &e in &entries {
            match seen.get_mut(e) {
                Some(s) if !*s => *s = true,
                _ => return Err(ScrambleError::InvalidKey { len }),
            }
        }
        Ok(Self(entries))
    }

    pub(crate) fn from_permutation(entries: Vec<usize>) -> Self {
        debug_assert!(Self::new(entries.clone()).is_ok());
        Self(entries)
    }
}

impl Deref for Key {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

/// SHA-256 of the password bytes.
pub fn digest(password: &[u8]) -> Digest {
    Sha256::digest(password).into()
}

/// Circular left rotation of a byte.
pub fn rotate_byte(byte: u8, bits: u32) -> u8 {
    byte.rotate_left(bits)
}

/// Ordered pool of `0..len` supporting removal by rank.
///
/// Backed by a Fenwick tree of presence counts, so finding and removing
/// the `idx`-th remaining value costs `O(log len)` instead of shifting
/// every later element.
#[derive(Debug, Clone)]
pub struct Pool {
    // 1-based
    tree: Vec<usize>,
    remaining: usize,
}

impl Pool {
    pub fn new(len: usize) -> Self {
        let mut tree = vec![1; len + 1];
        tree[0] = 0;
        for i in 1..=len {
            let parent = i + (i & i.wrapping_neg());
            if parent <= len {
                tree[parent] += tree[i];
            }
        }

        Self {
            tree,
            remaining: len,
        }
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Remove and return the `idx`-th smallest remaining value.
    ///
    /// Panics if `idx >= self.len()`.
    pub fn take(&mut self, idx: usize) -> usize {
        assert!(
            idx < self.remaining,
            "Pool index out of range ({idx} >= {})",
            self.remaining
        );

        let size = self.tree.len() - 1;
        let mut pos = 0;
        let mut rank = idx + 1;
        let mut step = if size == 0 { 0 } else { 1 << size.ilog2() };
        while step > 0 {
            let next = pos + step;
            if next <= size && self.tree[next] < rank {
                pos = next;
                rank -= self.tree[next];
            }
            step >>= 1;
        }

        // Value `pos` lives at 1-based slot `pos + 1`.
        let mut i = pos + 1;
        while i <= size {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
        self.remaining -= 1;

        pos
    }
}

/// Expand a digest into a permutation of `0..EXTENDED_KEY_LEN`.
pub fn extend_key(digest: &Digest) -> Key {
    let mut pool = Pool::new(EXTENDED_KEY_LEN);
    let mut out = Vec::with_capacity(EXTENDED_KEY_LEN);

    for round in 0..ROUNDS {
        for &b in digest {
            let idx = rotate_byte(b, round * 2) as usize % pool.len();
            out.push(pool.take(idx));
        }
    }
    debug_assert!(pool.is_empty());

    Key::from_permutation(out)
}

/// Mix an identity index matrix with `extended`, giving a permutation
/// of `0..config.derived_key_len()`.
pub fn build_derived_key(extended: &Key, config: &Config) -> Key {
    let side = config.grid_side();
    let identity = Array2::from_shape_fn((side, side), |(y, x)| y * side + x);

    let mixed = permute(identity, extended, Direction::Forward);
    Key::from_permutation(mixed.iter().copied().collect())
}

/// Derive the pixel key for `password`.
///
/// Always runs the network forward, so scrambling and unscrambling
/// get the same key.
pub fn derive_key(password: &str, config: &Config) -> Key {
    let extended = extend_key(&digest(password.as_bytes()));
    let key = build_derived_key(&extended, config);
    debug!(
        grid_side = config.grid_side(),
        len = key.len(),
        "derived key"
    );
    key
}
