//! Bit-stream encoder: variable-length codes packed into 64-bit words,
//! with a raw-byte fallback whenever coding would inflate the input.
//!
//! The first two bits of every Huffman stream are an endianness sentinel:
//! `01` from a big-endian producer, `00` from a little-endian one. The
//! first flushed word is always written most-significant byte first so
//! that the sentinel lands in the first output byte; later full words
//! follow the producer's native byte order and the final partial word is
//! again byte-aligned out from the high end. Because the two top bits of
//! the first byte are reserved, a Huffman stream can never start with
//! `0xFF`, which leaves `0xFF` free to mark the raw fallback.

use crate::CodecError;

use super::{HuffmanCodec, State};

/// Bytes `out` must hold to encode `input_len` input bytes: the coded
/// stream never exceeds the input, and the fallback adds one byte.
pub const fn encoded_capacity(input_len: usize) -> usize {
    input_len + 1
}

/// Full 64-bit words of the stream. The first word goes out high byte
/// first regardless of endianness, keeping the sentinel in byte 0.
struct WordSink<'a> {
    out: &'a mut [u8],
    pos: usize,
    big: bool,
}

impl WordSink<'_> {
    #[inline(always)]
    fn flush(&mut self, word: u64) {
        let bytes = if self.big || self.pos == 0 {
            word.to_be_bytes()
        } else {
            word.to_le_bytes()
        };
        self.out[self.pos..self.pos + 8].copy_from_slice(&bytes);
        self.pos += 8;
    }
}

/// Appends the low `nbits` of `value` to the stream. The accumulator
/// fills from its high end; a full word spills into the sink and the
/// leftover low bits restart at the top.
#[inline(always)]
fn push_bits(sink: &mut WordSink, ocode: &mut u64, rem: &mut i32, nbits: u32, value: u64) {
    *rem -= nbits as i32;
    if *rem <= 0 {
        *ocode |= value >> -*rem as u32;
        sink.flush(*ocode);
        if *rem < 0 {
            *rem += 64;
            *ocode = value << *rem as u32;
        } else {
            *rem = 64;
            *ocode = 0;
        }
    } else {
        *ocode |= value << *rem as u32;
    }
}

impl HuffmanCodec {
    /// Encodes `input` into `out` and returns the number of stream bits.
    ///
    /// Bytes without a code are emitted as the escape code followed by an
    /// 8-bit literal; so is the escape byte itself, whose code is taken
    /// by the escape channel. If at any point the coded stream would
    /// outgrow the input, the output is restarted as `0xFF` followed by
    /// the raw input bytes and `8 * (input.len() + 1)` bits are returned.
    ///
    /// # Panics
    /// If `out` is shorter than [`encoded_capacity`]`(input.len())`.
    pub fn encode(&self, input: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
        if self.state < State::CodedBuilt {
            return Err(CodecError::StateViolation {
                op: "encode",
                state: self.state,
            });
        }
        assert!(
            out.len() >= encoded_capacity(input.len()),
            "output buffer holds {} bytes, need {}",
            out.len(),
            encoded_capacity(input.len())
        );

        let lens = &self.tables.code_len;
        let bits = &self.tables.code_bits;
        let esc = self.esc_code;
        let ibits = input.len() << 3;

        let mut sink = WordSink {
            out,
            pos: 0,
            big: self.big_endian,
        };
        let mut ocode: u64 = if self.big_endian {
            0x4000_0000_0000_0000
        } else {
            0
        };
        let mut rem: i32 = 62;
        let mut tbits: usize = 2;

        let mut fell_back = false;
        for &x in input {
            let n = lens[x as usize] as u32;
            if n == 0 || x as i32 == esc {
                if esc < 0 {
                    return Err(CodecError::UnknownSymbol(x));
                }
                let en = lens[esc as usize] as u32;
                tbits += en as usize + 8;
                if tbits > ibits {
                    fell_back = true;
                    break;
                }
                push_bits(&mut sink, &mut ocode, &mut rem, en, bits[esc as usize] as u64);
                push_bits(&mut sink, &mut ocode, &mut rem, 8, x as u64);
            } else {
                tbits += n as usize;
                if tbits > ibits {
                    fell_back = true;
                    break;
                }
                push_bits(&mut sink, &mut ocode, &mut rem, n, bits[x as usize] as u64);
            }
        }

        let pos = sink.pos;
        let out = sink.out;
        if fell_back {
            out[0] = 0xFF;
            out[1..=input.len()].copy_from_slice(input);
            return Ok((input.len() + 1) << 3);
        }

        // Byte-align the final partial word out, high bytes first.
        let tail = ((71 - rem) >> 3) as usize;
        out[pos..pos + tail].copy_from_slice(&ocode.to_be_bytes()[..tail]);

        // The sentinel reserves the top of byte 0, so raw-fallback
        // detection stays unambiguous.
        debug_assert!(out[0] & 0xC0 != 0xC0);

        Ok(tbits)
    }
}
