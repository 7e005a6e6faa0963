//! The trainable length-limited Huffman codec.
//!
//! A [`HuffmanCodec`] moves through a one-way lifecycle: counts are
//! accumulated into its histogram, the code tables are built from the
//! histogram (optionally with an escape code for bytes the training data
//! never showed), and from then on the codec is immutable and can be
//! shared freely across concurrent encoders and decoders.

mod decoder;
mod encoder;
mod model_builder;
mod serialize;

pub use encoder::encoded_capacity;

use std::fmt;

use crate::{CodecError, LOOKUP_SIZE, NUM_SYMBOLS};

/// Lifecycle state of a [`HuffmanCodec`].
///
/// States are ordered: every state from [`State::CodedBuilt`] on has code
/// tables and can no longer accumulate counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    /// Just created, histogram zeroed.
    Empty,
    /// Histogram holds counts, no code tables yet.
    Filled,
    /// Code tables built from the histogram; the histogram is retained
    /// for reporting.
    CodedBuilt,
    /// Code tables loaded from a serialized blob; no histogram.
    CodedLoaded,
}

/// Code tables of a coded codec, kept together as one allocation.
#[derive(Clone)]
pub(crate) struct CodeTables {
    /// Code length in bits per byte symbol, 0 when the symbol has no code.
    pub(crate) code_len: [u8; NUM_SYMBOLS],
    /// Right-aligned code word per byte symbol, at most 16 bits.
    pub(crate) code_bits: [u16; NUM_SYMBOLS],
    /// Maps each possible value of the next 16 stream bits to the symbol
    /// whose code is a prefix of those bits.
    pub(crate) lookup: [u8; LOOKUP_SIZE],
}

impl CodeTables {
    pub(crate) fn zeroed() -> Box<Self> {
        Box::new(CodeTables {
            code_len: [0; NUM_SYMBOLS],
            code_bits: [0; NUM_SYMBOLS],
            lookup: [0; LOOKUP_SIZE],
        })
    }
}

/// A length-limited Huffman codec over byte symbols.
#[derive(Clone)]
pub struct HuffmanCodec {
    /// Endianness of the machine that owns this codec; fixes the byte
    /// order of flushed stream words.
    pub(crate) big_endian: bool,
    pub(crate) state: State,
    /// Byte frequencies of the training data. `None` once the codec has
    /// been loaded from a blob.
    pub(crate) hist: Option<Box<[u64; NUM_SYMBOLS]>>,
    /// The symbol reserved to prefix an 8-bit literal, -1 when absent.
    pub(crate) esc_code: i32,
    pub(crate) tables: Box<CodeTables>,
}

impl HuffmanCodec {
    /// Creates an empty codec ready to accumulate counts.
    pub fn new() -> Self {
        HuffmanCodec {
            big_endian: cfg!(target_endian = "big"),
            state: State::Empty,
            hist: Some(Box::new([0; NUM_SYMBOLS])),
            esc_code: -1,
            tables: CodeTables::zeroed(),
        }
    }

    /// Adds the byte frequencies of `bytes` to the histogram. An empty
    /// slice is legal and leaves the counts untouched.
    ///
    /// Fails with [`CodecError::StateViolation`] once the code tables
    /// have been built: the histogram is frozen from then on.
    pub fn add(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        if self.state >= State::CodedBuilt {
            return Err(CodecError::StateViolation {
                op: "add",
                state: self.state,
            });
        }
        let hist = self
            .hist
            .as_mut()
            .expect("a codec below CodedBuilt always owns its histogram");
        for &b in bytes {
            hist[b as usize] += 1;
        }
        self.state = State::Filled;
        Ok(())
    }

    /// Builds the code tables from the accumulated histogram.
    ///
    /// With `partial` set, the lowest-indexed byte with a zero count is
    /// reserved as the escape code, letting the encoder emit bytes the
    /// training data never contained as escape-prefixed 8-bit literals.
    /// If every byte has a positive count no escape is reserved and such
    /// bytes fail to encode with [`CodecError::UnknownSymbol`].
    pub fn build(&mut self, partial: bool) -> Result<(), CodecError> {
        if self.state >= State::CodedBuilt || self.state == State::Empty {
            return Err(CodecError::StateViolation {
                op: "build",
                state: self.state,
            });
        }
        let hist = self
            .hist
            .as_ref()
            .expect("a codec below CodedBuilt always owns its histogram");
        self.esc_code = model_builder::build_code_tables(hist, partial, &mut self.tables);
        self.state = State::CodedBuilt;
        Ok(())
    }

    /// The codec's lifecycle state.
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the machine that built or loaded this codec is big-endian.
    #[inline(always)]
    pub fn is_big_endian(&self) -> bool {
        self.big_endian
    }

    /// The escape symbol, if one was reserved at build time.
    #[inline(always)]
    pub fn escape_code(&self) -> Option<u8> {
        u8::try_from(self.esc_code).ok()
    }

    /// Code length in bits of `symbol`, 0 when it has no code.
    #[inline(always)]
    pub fn code_len(&self, symbol: u8) -> u8 {
        self.tables.code_len[symbol as usize]
    }

    /// Right-aligned code word of `symbol`.
    #[inline(always)]
    pub fn code_bits(&self, symbol: u8) -> u16 {
        self.tables.code_bits[symbol as usize]
    }

    /// The training histogram, absent on codecs loaded from a blob.
    pub fn histogram(&self) -> Option<&[u64; NUM_SYMBOLS]> {
        self.hist.as_deref()
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostic dump: the histogram (when retained), the code table with
/// the escape marked, and the projected compressed size.
impl fmt::Display for HuffmanCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.state < State::CodedBuilt {
            return writeln!(f, "codec has no code table yet");
        }

        if let Some(hist) = &self.hist {
            let total: u64 = hist.iter().sum();
            writeln!(f, "\nHistogram:")?;
            for (i, &count) in hist.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let pct = (count * 100) as f64 / total as f64;
                if (0x20..0x7f).contains(&i) {
                    writeln!(f, "      {}: {:12} {:5.1}%", i as u8 as char, count, pct)?;
                } else {
                    writeln!(f, "    {:3}: {:12} {:5.1}%", i, count, pct)?;
                }
            }
        }

        let mut coded_bits = 0u64;
        let mut raw_bits = 0u64;
        writeln!(f, "\nCode Table:")?;
        for s in 0..NUM_SYMBOLS {
            let len = self.tables.code_len[s];
            if len == 0 {
                continue;
            }
            let bits = self.tables.code_bits[s];
            let mut word = String::with_capacity(len as usize);
            for k in (0..len).rev() {
                word.push(if bits >> k & 1 == 1 { '1' } else { '0' });
            }
            if (0x20..0x7f).contains(&s) {
                write!(f, "   {}: {:2} {}", s as u8 as char, len, word)?;
            } else {
                write!(f, " {:3}: {:2} {}", s, len, word)?;
            }
            if s as i32 == self.esc_code {
                writeln!(f, " ***")?;
            } else {
                writeln!(f)?;
                if let Some(hist) = &self.hist {
                    coded_bits += len as u64 * hist[s];
                    raw_bits += hist[s] << 3;
                }
            }
        }
        if coded_bits > 0 && raw_bits > 0 {
            writeln!(
                f,
                "\nTotal Bytes = {} ({:.2}%)",
                (coded_bits - 1) / 8 + 1,
                coded_bits as f64 * 100.0 / raw_bits as f64
            )?;
        }
        Ok(())
    }
}
