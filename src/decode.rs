//! Packed Morse to text.
//!
//! Decoding recovers symbol boundaries from run lengths alone: marks (runs of
//! `1`) of length 1 and 3 are dots and dashes, and the length of the following
//! gap (run of `0`) says whether the character continues, ends, or ends a word.

use crate::bits::{bit_capacity, get_bit, run_length, Unit};
use crate::error::CodecError;
use crate::table::{code_to_char, DASH, DOT, MAX_CODE_LEN, TERMINATOR};

/// Number of text bytes a decoding of `n_units` units can produce.
///
/// The densest stream is all `E`s, four bits per character, each possibly
/// followed by a space. One extra byte is left for a caller's terminator.
///
/// # Errors
/// Returns [`CodecError::ArithmeticOverflow`] if the size does not fit in
/// `usize`.
pub fn decoded_capacity<U: Unit>(n_units: usize) -> Result<usize, CodecError> {
    n_units
        .checked_mul(2 * (U::WIDTH / 4))
        .ok_or(CodecError::ArithmeticOverflow)?
        .checked_add(1)
        .ok_or(CodecError::ArithmeticOverflow)
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject gaps other than 1, 3 or 7 bits, except a gap that runs to the
    /// end of the input (trailing padding).
    ///
    /// By default any gap longer than 3 bits other than 7 is accepted as the
    /// end of a character.
    pub strict_gaps: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    Symbol,
    Char,
    Word,
}

/// Output cursor over a fixed-capacity text buffer.
struct TextCursor<'a> {
    text: &'a mut [u8],
    len: usize,
}

impl TextCursor<'_> {
    fn push(&mut self, byte: u8) -> Result<(), CodecError> {
        if self.len == self.text.len() {
            return Err(CodecError::BufferTooSmall {
                needed: self.len + 1,
                available: self.text.len(),
            });
        }
        self.text[self.len] = byte;
        self.len += 1;
        Ok(())
    }
}

/// Packed Morse decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// A decoder that only accepts the canonical 1, 3 and 7 bit gaps.
    pub fn strict() -> Self {
        Self::new(DecodeOptions { strict_gaps: true })
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    fn classify_gap(&self, len: usize, at_end: bool) -> Option<Gap> {
        match len {
            1 => Some(Gap::Symbol),
            3 => Some(Gap::Char),
            7 => Some(Gap::Word),
            len if len > 3 && (at_end || !self.options.strict_gaps) => Some(Gap::Char),
            _ => None,
        }
    }

    /// Decodes `morse` into `text` and returns the number of bytes written.
    ///
    /// Leading zero bits are ignored. Decoding stops at the AR prosign, which
    /// is not written, or at the end of `morse`. Each word gap is written as a
    /// single space after the character it follows.
    ///
    /// # Errors
    /// Returns an error for any run or pattern that is not valid Morse, or
    /// [`CodecError::BufferTooSmall`] if `text` fills up.
    /// [`decoded_capacity`] is always large enough.
    pub fn decode_into<U: Unit>(&self, morse: &[U], text: &mut [u8]) -> Result<usize, CodecError> {
        let n_units = morse.len();
        let max_bits = bit_capacity::<U>(n_units);
        let mut out = TextCursor { text, len: 0 };

        let mut offset = 0;
        if max_bits > 0 && !get_bit(morse, 0) {
            offset = run_length(morse, n_units, 0);
        }

        let mut code = [0u8; MAX_CODE_LEN];
        while offset < max_bits {
            let char_start = offset;
            let mut code_len = 0;
            let mut word_gap = false;

            loop {
                // Runs are maximal, so every mark starts right after a gap.
                debug_assert!(get_bit(morse, offset));
                let mark = run_length(morse, n_units, offset);
                let symbol = match mark {
                    1 => DOT,
                    3 => DASH,
                    len => return Err(CodecError::InvalidMark { offset, len }),
                };
                if code_len == MAX_CODE_LEN {
                    return Err(CodecError::CodeTooLong { offset: char_start });
                }
                code[code_len] = symbol;
                code_len += 1;
                offset += mark;

                if offset >= max_bits {
                    break;
                }

                let gap = run_length(morse, n_units, offset);
                let gap_start = offset;
                offset += gap;
                match self.classify_gap(gap, offset >= max_bits) {
                    Some(Gap::Symbol) if offset < max_bits => continue,
                    Some(Gap::Symbol | Gap::Char) => break,
                    Some(Gap::Word) => {
                        word_gap = true;
                        break;
                    }
                    None => {
                        return Err(CodecError::InvalidGap {
                            offset: gap_start,
                            len: gap,
                        })
                    }
                }
            }

            let pattern = &code[..code_len];
            let ch = code_to_char(pattern).ok_or_else(|| CodecError::UnknownCode {
                offset: char_start,
                code: String::from_utf8_lossy(pattern).into_owned(),
            })?;
            if ch == TERMINATOR {
                break;
            }

            out.push(ch as u8)?;
            if word_gap {
                out.push(b' ')?;
            }
        }

        Ok(out.len)
    }

    /// Decodes `morse` into a freshly allocated buffer sized by
    /// [`decoded_capacity`] and truncated to the bytes written.
    pub fn decode<U: Unit>(&self, morse: &[U]) -> Result<Vec<u8>, CodecError> {
        let mut text = vec![0u8; decoded_capacity::<U>(morse.len())?];
        let len = self.decode_into(morse, &mut text)?;
        text.truncate(len);
        Ok(text)
    }
}

/// Decodes with the default, lenient gap handling. See [`Decoder::decode_into`].
pub fn decode_into<U: Unit>(morse: &[U], text: &mut [u8]) -> Result<usize, CodecError> {
    Decoder::default().decode_into(morse, text)
}

/// Decodes with the default, lenient gap handling. See [`Decoder::decode`].
pub fn decode<U: Unit>(morse: &[U]) -> Result<Vec<u8>, CodecError> {
    Decoder::default().decode(morse)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOS_BIN: [u8; 6] = [0xa8, 0xee, 0xe2, 0xa2, 0xeb, 0xa0];

    #[test]
    fn test_decode_sos() {
        let mut text = [0u8; 10];
        let len = decode_into(&SOS_BIN, &mut text).unwrap();
        assert_eq!(len, 3);
        assert_eq!(&text[..len], b"SOS");
    }

    #[test]
    fn test_decode_sos_u16() {
        let morse: [u16; 3] = [0xa8ee, 0xe2a2, 0xeba0];
        assert_eq!(decode(&morse).unwrap(), b"SOS");
    }

    #[test]
    fn test_decode_skips_leading_zeros() {
        let mut morse = vec![0u8, 0];
        morse.extend_from_slice(&SOS_BIN);
        assert_eq!(decode(&morse).unwrap(), b"SOS");

        // 00000 111 => T
        assert_eq!(decode(&[0b0000_0111u8]).unwrap(), b"T");
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode::<u8>(&[]).unwrap(), b"");
        assert_eq!(decode(&[0u8, 0, 0]).unwrap(), b"");
    }

    #[test]
    fn test_decode_stops_at_prosign() {
        let mut morse = SOS_BIN.to_vec();
        morse.extend_from_slice(&[0xff, 0x12]);
        assert_eq!(decode(&morse).unwrap(), b"SOS");
    }

    #[test]
    fn test_decode_without_prosign() {
        // 101010 00 => S
        assert_eq!(decode(&[0xa8u8]).unwrap(), b"S");
        // 1 0 1 => I, ending in a mark at the buffer end
        assert_eq!(decode(&[0b0000_0101u8]).unwrap(), b"I");
    }

    #[test]
    fn test_decode_word_gap() {
        // E 0000000 E 000 E 000
        let morse = [0b1000_0000u8, 0b1000_1000];
        assert_eq!(decode(&morse).unwrap(), b"E EE");
    }

    #[test]
    fn test_decode_invalid_mark() {
        let err = decode(&[0b1100_0000u8]).unwrap_err();
        assert_eq!(err, CodecError::InvalidMark { offset: 0, len: 2 });

        let err = decode(&[0b1011_1100u8]).unwrap_err();
        assert_eq!(err, CodecError::InvalidMark { offset: 2, len: 4 });
    }

    #[test]
    fn test_decode_invalid_gap() {
        let err = decode(&[0b1001_0000u8]).unwrap_err();
        assert_eq!(err, CodecError::InvalidGap { offset: 1, len: 2 });
    }

    #[test]
    fn test_decode_unknown_code() {
        // ..-- is unassigned
        let err = decode(&[0b1010_1110u8, 0b1110_0000]).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownCode {
                offset: 0,
                code: "..--".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown code `..--` at bit offset 0");
    }

    #[test]
    fn test_decode_code_too_long() {
        // six dots
        let err = decode(&[0b1010_1010u8, 0b1010_0000]).unwrap_err();
        assert_eq!(err, CodecError::CodeTooLong { offset: 0 });
    }

    #[test]
    fn test_decode_lenient_gaps() {
        // E, 5-bit gap, E
        let morse = [0b1000_0010u8];
        assert_eq!(decode(&morse).unwrap(), b"EE");

        let err = Decoder::strict().decode(&morse).unwrap_err();
        assert_eq!(err, CodecError::InvalidGap { offset: 1, len: 5 });
    }

    #[test]
    fn test_decode_strict_accepts_canonical_stream() {
        let decoder = Decoder::strict();
        assert!(decoder.options().strict_gaps);
        assert_eq!(decoder.decode(&SOS_BIN).unwrap(), b"SOS");
        // trailing padding after the last character is not a gap error
        assert_eq!(decoder.decode(&[0xa8u8, 0x00]).unwrap(), b"S");
    }

    #[test]
    fn test_decode_buffer_too_small() {
        let mut text = [0u8; 2];
        let err = decode_into(&SOS_BIN, &mut text).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                needed: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_decoded_capacity() {
        assert_eq!(decoded_capacity::<u8>(0), Ok(1));
        assert_eq!(decoded_capacity::<u8>(6), Ok(25));
        assert_eq!(decoded_capacity::<u16>(3), Ok(25));
    }

    #[test]
    fn test_decoded_capacity_overflow() {
        assert_eq!(decoded_capacity::<u8>(usize::MAX), Err(CodecError::ArithmeticOverflow));
        assert_eq!(decoded_capacity::<u32>(usize::MAX / 8), Err(CodecError::ArithmeticOverflow));
        assert!(decoded_capacity::<u8>(usize::MAX / 8).is_ok());
    }

    #[test]
    fn test_decoded_capacity_holds_densest_stream() {
        // E 0000000 repeated: 8 bits per "E " pair
        let morse = [0b1000_0000u8; 16];
        let text = decode(&morse).unwrap();
        assert_eq!(text.len(), 32);
        assert!(text.len() < decoded_capacity::<u8>(morse.len()).unwrap());
    }
}
