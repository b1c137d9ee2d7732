//! Byte View Module
//!
//! Immutable wrapper around the raw bytes of one cached value.

use std::fmt;

use crate::cache::ByteSize;

// == Byte View ==
/// An immutable view over cached bytes.
///
/// The internal buffer is never handed out by reference. Every accessor
/// returns a fresh copy, so a holder cannot mutate what the cache keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteView {
    b: Vec<u8>,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view by copying the given bytes.
    pub fn new(bytes: &[u8]) -> Self {
        Self { b: bytes.to_vec() }
    }

    // == Length ==
    /// Returns the number of bytes held.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    // == Byte Slice ==
    /// Returns an independent copy of the bytes.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.clone()
    }
}

impl ByteSize for ByteView {
    fn byte_size(&self) -> usize {
        self.b.len()
    }
}

/// Takes ownership of the buffer; the caller gives up its handle to it.
impl From<Vec<u8>> for ByteView {
    fn from(b: Vec<u8>) -> Self {
        Self { b }
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self { b: s.into_bytes() }
    }
}

/// Lossy UTF-8 rendering; `to_string()` yields a fresh `String`.
impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}
