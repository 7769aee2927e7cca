use thiserror::Error;

/// An error that can occur while encoding or decoding.
///
/// Every variant carries enough context to explain which part of the input
/// was rejected; the `Display` output is the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A run of `1` bits that is neither a dot (1) nor a dash (3).
    #[error("invalid mark of {len} bits at bit offset {offset}")]
    InvalidMark { offset: usize, len: usize },
    /// A run of `0` bits that does not separate symbols, characters or words.
    #[error("invalid gap of {len} bits at bit offset {offset}")]
    InvalidGap { offset: usize, len: usize },
    /// A character with more symbols than any table entry.
    #[error("character at bit offset {offset} has too many symbols")]
    CodeTooLong { offset: usize },
    /// A complete dot-dash sequence with no table entry.
    #[error("unknown code `{code}` at bit offset {offset}")]
    UnknownCode { offset: usize, code: String },
    /// The destination buffer cannot hold the output.
    #[error("destination buffer too small: need at least {needed} units, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
    /// A buffer size does not fit in `usize`.
    #[error("buffer size overflows usize")]
    ArithmeticOverflow,
}
