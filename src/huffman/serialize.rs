//! Endian-portable codec blobs.
//!
//! Layout, byte oriented with no alignment padding:
//!
//! ```text
//! offset 0       1 byte   endianness of the producer (0/1)
//! offset 1       4 bytes  escape code as a signed 32-bit value,
//!                         producer byte order
//! per symbol     1 byte   code length, then, when nonzero,
//!                2 bytes  code word in producer byte order
//! ```
//!
//! A consumer on the opposite endianness byte-reverses the escape code
//! and every code word while loading; the prefix table is rebuilt
//! locally. The DNA codec has no blob at all.

use crate::{CodecError, MAX_CODE_LEN, NUM_SYMBOLS};

use super::{model_builder, CodeTables, HuffmanCodec, State};

impl HuffmanCodec {
    /// Upper bound on the size of any serialized codec: the header plus
    /// a length and a code word for all 256 symbols.
    pub const MAX_SERIAL_SIZE: usize = 1 + 4 + NUM_SYMBOLS * 3;

    /// Writes the codec into `out` and returns the number of bytes used.
    /// Only symbols with a code contribute their code word, so the blob
    /// is usually well under [`Self::MAX_SERIAL_SIZE`].
    ///
    /// # Panics
    /// If `out` is shorter than [`Self::MAX_SERIAL_SIZE`].
    pub fn serialize(&self, out: &mut [u8]) -> Result<usize, CodecError> {
        if self.state < State::CodedBuilt {
            return Err(CodecError::StateViolation {
                op: "serialize",
                state: self.state,
            });
        }
        assert!(out.len() >= Self::MAX_SERIAL_SIZE);

        out[0] = self.big_endian as u8;
        out[1..5].copy_from_slice(&if self.big_endian {
            self.esc_code.to_be_bytes()
        } else {
            self.esc_code.to_le_bytes()
        });
        let mut pos = 5;
        for s in 0..NUM_SYMBOLS {
            let len = self.tables.code_len[s];
            out[pos] = len;
            pos += 1;
            if len > 0 {
                let bits = self.tables.code_bits[s];
                out[pos..pos + 2].copy_from_slice(&if self.big_endian {
                    bits.to_be_bytes()
                } else {
                    bits.to_le_bytes()
                });
                pos += 2;
            }
        }
        Ok(pos)
    }

    /// Reconstructs a codec from a serialized blob, byte-reversing the
    /// stored values when the producer's endianness differs from the
    /// local one. The loaded codec has no histogram.
    pub fn deserialize(blob: &[u8]) -> Result<Self, CodecError> {
        if blob.len() < 5 {
            return Err(CodecError::CorruptBlob("truncated header"));
        }
        let from_big = match blob[0] {
            0 => false,
            1 => true,
            _ => return Err(CodecError::CorruptBlob("bad endianness byte")),
        };

        let esc_bytes: [u8; 4] = blob[1..5].try_into().unwrap();
        let esc_code = if from_big {
            i32::from_be_bytes(esc_bytes)
        } else {
            i32::from_le_bytes(esc_bytes)
        };
        if !(-1..NUM_SYMBOLS as i32).contains(&esc_code) {
            return Err(CodecError::CorruptBlob("escape code out of range"));
        }

        let mut tables = CodeTables::zeroed();
        let mut pos = 5;
        for s in 0..NUM_SYMBOLS {
            let len = *blob
                .get(pos)
                .ok_or(CodecError::CorruptBlob("truncated length table"))?;
            pos += 1;
            if len == 0 {
                continue;
            }
            if len as usize > MAX_CODE_LEN {
                return Err(CodecError::CorruptBlob("code length over the limit"));
            }
            let raw: [u8; 2] = blob
                .get(pos..pos + 2)
                .ok_or(CodecError::CorruptBlob("truncated code word"))?
                .try_into()
                .unwrap();
            pos += 2;
            tables.code_len[s] = len;
            tables.code_bits[s] = if from_big {
                u16::from_be_bytes(raw)
            } else {
                u16::from_le_bytes(raw)
            };
        }
        if esc_code >= 0 && tables.code_len[esc_code as usize] == 0 {
            return Err(CodecError::CorruptBlob("escape code has no code word"));
        }
        model_builder::fill_lookup(&mut tables);

        Ok(HuffmanCodec {
            big_endian: cfg!(target_endian = "big"),
            state: State::CodedLoaded,
            hist: None,
            esc_code,
            tables,
        })
    }
}
