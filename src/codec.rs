//! The public codec surface: one type covering the trainable Huffman
//! codec and the fixed DNA codec.
//!
//! The DNA codec is a process-wide singleton value distinguished by
//! variant identity: it carries no tables, trains on nothing and
//! serializes to zero bytes. Everything else flows through the
//! [`HuffmanCodec`] it wraps.

use std::fmt;

use crate::{dna, CodecError, HuffmanCodec, State};

/// A byte-stream codec: either a trainable length-limited Huffman codec
/// or the fixed 2-bit DNA codec.
///
/// Once coded (built or loaded) a codec is immutable and can be shared
/// across threads; [`Codec::add`] and [`Codec::build`] require exclusive
/// access.
#[derive(Clone)]
pub enum Codec {
    /// A trainable length-limited Huffman codec.
    Huffman(HuffmanCodec),
    /// The fixed 2-bit nucleotide codec.
    Dna,
}

impl Codec {
    /// Creates an empty trainable codec.
    pub fn new() -> Self {
        Codec::Huffman(HuffmanCodec::new())
    }

    /// The DNA codec.
    pub const fn dna() -> Self {
        Codec::Dna
    }

    /// Whether this is the DNA codec.
    #[inline(always)]
    pub fn is_dna(&self) -> bool {
        matches!(self, Codec::Dna)
    }

    /// The wrapped Huffman codec, if this is not the DNA codec.
    pub fn as_huffman(&self) -> Option<&HuffmanCodec> {
        match self {
            Codec::Huffman(huffman) => Some(huffman),
            Codec::Dna => None,
        }
    }

    /// Adds the byte frequencies of `bytes` to the training histogram.
    /// See [`HuffmanCodec::add`].
    pub fn add(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        match self {
            Codec::Huffman(huffman) => huffman.add(bytes),
            Codec::Dna => Err(CodecError::StateViolation {
                op: "add",
                state: State::CodedLoaded,
            }),
        }
    }

    /// Builds the code tables from the accumulated histogram. See
    /// [`HuffmanCodec::build`].
    pub fn build(&mut self, partial: bool) -> Result<(), CodecError> {
        match self {
            Codec::Huffman(huffman) => huffman.build(partial),
            Codec::Dna => Err(CodecError::StateViolation {
                op: "build",
                state: State::CodedLoaded,
            }),
        }
    }

    /// Upper bound on the size of any serialized codec, in bytes.
    pub const fn max_serial_size() -> usize {
        HuffmanCodec::MAX_SERIAL_SIZE
    }

    /// Serializes the codec into `out` and returns the bytes written.
    /// The DNA codec serializes to zero bytes.
    pub fn serialize(&self, out: &mut [u8]) -> Result<usize, CodecError> {
        match self {
            Codec::Huffman(huffman) => huffman.serialize(out),
            Codec::Dna => Ok(0),
        }
    }

    /// Reconstructs a coded codec from a serialized blob. The result is
    /// always a Huffman codec: the DNA codec is recognized by identity,
    /// never by blob contents.
    pub fn deserialize(blob: &[u8]) -> Result<Self, CodecError> {
        Ok(Codec::Huffman(HuffmanCodec::deserialize(blob)?))
    }

    /// Bytes `out` must hold to encode `input_len` input bytes.
    pub fn encoded_capacity(&self, input_len: usize) -> usize {
        match self {
            Codec::Huffman(_) => crate::huffman::encoded_capacity(input_len),
            Codec::Dna => dna::compressed_capacity(input_len),
        }
    }

    /// Encodes `input` into `out` and returns the number of stream bits.
    /// See [`HuffmanCodec::encode`]; for the DNA codec this packs two
    /// bits per base and always returns `2 * input.len()`.
    pub fn encode(&self, input: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
        match self {
            Codec::Huffman(huffman) => huffman.encode(input, out),
            Codec::Dna => Ok(dna::compress(input, out)),
        }
    }

    /// Decodes `in_bits` bits of `input` into `out` and returns the
    /// number of bytes written. See [`HuffmanCodec::decode`]; for the
    /// DNA codec the decoded length is `in_bits / 2`.
    pub fn decode(&self, input: &[u8], in_bits: usize, out: &mut [u8]) -> Result<usize, CodecError> {
        match self {
            Codec::Huffman(huffman) => huffman.decode(input, in_bits, out),
            Codec::Dna => Ok(dna::uncompress(input, in_bits / 2, out)),
        }
    }

    /// Dumps the histogram and code table to standard output.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Huffman(huffman) => fmt::Display::fmt(huffman, f),
            Codec::Dna => writeln!(f, "    DNA codec"),
        }
    }
}
