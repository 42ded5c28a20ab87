//! Packed 64-bit node addresses.
//!
//! An address spells out the path from the root set to a node, one byte per
//! level, most significant byte first. Byte `i` is the child index at depth
//! `i`; the first `0xff` byte ends the path and every byte after it is also
//! `0xff`.
//!
//! ```text
//! 0xffff_ffff_ffff_ffff   root (the sentinel)
//! 0x02ff_ffff_ffff_ffff   root.children[2]
//! 0x0100_ffff_ffff_ffff   root.children[1].children[0]
//! ```
//!
//! Because `0xff` is the terminator, a set holds at most [`MAX_CHILDREN`]
//! children, and only [`MAX_LEVELS`] levels fit in the word.

use paramtree_core::Address;

/// Levels that fit in one address.
pub const MAX_LEVELS: usize = 8;

/// Children one set can hold (indices `0x00..=0xfd`).
pub const MAX_CHILDREN: usize = 254;

const TERMINATOR: u8 = 0xff;

/// Decoded address: child indices from the root down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedPath {
    bytes: [u8; MAX_LEVELS],
    len: usize,
}

impl PackedPath {
    /// The root set.
    pub const ROOT: Self = Self {
        bytes: [TERMINATOR; MAX_LEVELS],
        len: 0,
    };

    /// Decodes `address`, rejecting words with data after the terminator.
    pub fn decode(address: Address) -> Option<Self> {
        let bytes = address.raw().to_be_bytes();
        let len = bytes
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(MAX_LEVELS);
        if bytes[len..].iter().any(|&b| b != TERMINATOR) {
            return None;
        }
        Some(Self { bytes, len })
    }

    /// Encodes back into an address.
    pub fn encode(self) -> Address {
        Address(u64::from_be_bytes(self.bytes))
    }

    /// Child indices from the root down.
    pub fn indices(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.len
    }

    /// Path of child `index` of this node, if it fits.
    pub fn child(self, index: usize) -> Option<Self> {
        if self.len == MAX_LEVELS || index >= MAX_CHILDREN {
            return None;
        }
        let mut bytes = self.bytes;
        bytes[self.len] = index as u8;
        Some(Self {
            bytes,
            len: self.len + 1,
        })
    }

    /// Splits off the last level: `(parent, index)`. `None` for the root.
    pub fn split_last(self) -> Option<(Self, usize)> {
        let last = self.len.checked_sub(1)?;
        let index = self.bytes[last];
        let mut bytes = self.bytes;
        bytes[last] = TERMINATOR;
        Some((Self { bytes, len: last }, usize::from(index)))
    }
}
