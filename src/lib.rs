//! Length-limited Huffman coding for the short per-record fields of
//! sequencing data (quality strings, identifiers, CIGAR-like strings),
//! plus a fixed 2-bit codec for nucleotide sequences.
//!
//! A [`Codec`] is trained on sample data with [`Codec::add`], built with
//! [`Codec::build`] and then encodes arbitrary byte buffers with a
//! guaranteed worst-case expansion of one byte: whenever Huffman coding
//! would inflate the input, the encoder falls back to emitting the raw
//! bytes behind a `0xFF` sentinel. Code lengths are bounded by
//! [`MAX_CODE_LEN`] via the Larmore–Hirschberg package-merge
//! construction, so the decoder runs off a single 16-bit prefix table.
//!
//! Built codecs serialize to an endian-portable blob of at most
//! [`HuffmanCodec::MAX_SERIAL_SIZE`] bytes; the DNA codec serializes to
//! zero bytes and is recognized by identity.

pub mod codec;
pub mod dna;
mod error;
pub mod huffman;

pub use codec::Codec;
pub use error::CodecError;
pub use huffman::{HuffmanCodec, State};

/// Hard ceiling on the length of any Huffman code, in bits.
///
/// This cannot exceed [`LOOKUP_BITS`]: the decoder resolves every code
/// with one probe of a table indexed by the next 16 stream bits.
pub const MAX_CODE_LEN: usize = 12;

/// Number of stream bits the decoder table is indexed by.
pub const LOOKUP_BITS: usize = 16;

/// Number of entries in the decoder's prefix table.
pub const LOOKUP_SIZE: usize = 1 << LOOKUP_BITS;

/// Number of distinct byte symbols a codec can code.
pub const NUM_SYMBOLS: usize = 256;
