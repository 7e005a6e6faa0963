//! Error type for codec operations.

use crate::huffman::State;

/// Error type for all fallible codec operations.
///
/// Every kind is surfaced to the caller; none is recovered internally.
/// Note that the raw-byte fallback taken by the encoder when Huffman
/// coding would inflate the input is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The requested operation is not legal in the codec's current state,
    /// e.g. accumulating counts after the code tables were built, or
    /// encoding before they exist.
    #[error("cannot {op} a codec in state {state:?}")]
    StateViolation { op: &'static str, state: State },

    /// Encode met a byte that has no code and no escape to hide behind.
    #[error("byte {0:#04x} has no code and the codec has no escape")]
    UnknownSymbol(u8),

    /// A serialized codec blob is truncated or carries data no builder
    /// could have produced.
    #[error("corrupt codec blob: {0}")]
    CorruptBlob(&'static str),
}
