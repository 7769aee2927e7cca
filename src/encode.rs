//! Text to packed Morse.
//!
//! # Timing code
//! - dot: `1`, dash: `111`
//! - gap between symbols of one character: `0`
//! - gap between characters: `000`
//! - gap between words: `0000000`
//!
//! Every symbol is written with its one-bit trailing gap and every character
//! with two more zero bits, so each character ends in exactly three zeros. A
//! word break adds four more. The message always ends with the AR prosign.

use crate::bits::{bit_capacity, set_bits, units_for_bits, Unit};
use crate::error::CodecError;
use crate::table::{char_to_code, DOT, TERMINATOR};

const DOT_BITS: usize = 1;
const DASH_BITS: usize = 3;
const SYMBOL_GAP_BITS: usize = 1;
const CHAR_GAP_EXTENSION_BITS: usize = 2;
const WORD_GAP_EXTENSION_BITS: usize = 4;

// The widest character is '0' (five dashes) followed by a word break:
// 4 * (3 + 1) + 3 + 7 == 26 bits.
const WORST_CASE_BITS_PER_CHAR: usize = 26;

/// Number of units an encoding of `n_chars` text bytes can occupy.
///
/// Two extra characters are reserved for the AR prosign.
///
/// # Errors
/// Returns [`CodecError::ArithmeticOverflow`] if the size in bits does not fit
/// in `usize`.
pub fn encoded_capacity<U: Unit>(n_chars: usize) -> Result<usize, CodecError> {
    let n_bits = n_chars
        .checked_add(2)
        .ok_or(CodecError::ArithmeticOverflow)?
        .checked_mul(WORST_CASE_BITS_PER_CHAR)
        .ok_or(CodecError::ArithmeticOverflow)?;
    Ok(units_for_bits::<U>(n_bits))
}

/// Write cursor over a fixed-capacity unit buffer.
struct BitCursor<'a, U: Unit> {
    units: &'a mut [U],
    offset: usize,
}

impl<'a, U: Unit> BitCursor<'a, U> {
    fn new(units: &'a mut [U]) -> Self {
        Self { units, offset: 0 }
    }

    fn emit(&mut self, bit: bool, count: usize) -> Result<(), CodecError> {
        let end = self.offset + count;
        if end > bit_capacity::<U>(self.units.len()) {
            return Err(CodecError::BufferTooSmall {
                needed: units_for_bits::<U>(end),
                available: self.units.len(),
            });
        }
        self.offset = set_bits(self.units, self.offset, bit, count);
        Ok(())
    }

    /// Clears the unused tail of the last unit and returns the units used.
    fn finish(self) -> usize {
        let used = units_for_bits::<U>(self.offset);
        let padding = bit_capacity::<U>(used) - self.offset;
        set_bits(self.units, self.offset, false, padding);
        used
    }
}

fn skip_separators(text: &[u8], pos: usize) -> usize {
    text[pos..]
        .iter()
        .position(u8::is_ascii_alphanumeric)
        .map_or(text.len(), |i| pos + i)
}

/// Encodes `text` into `morse` and returns the number of units used.
///
/// Letters are case-folded. Any run of other bytes (punctuation, whitespace,
/// control bytes, non-ASCII) is a single word break; leading ones are ignored.
/// The output is terminated with the AR prosign. Only the returned prefix of
/// `morse` is written.
///
/// # Errors
/// Returns [`CodecError::BufferTooSmall`] if `morse` cannot hold the
/// encoding. [`encoded_capacity`] is always large enough.
pub fn encode_into<U: Unit>(text: &[u8], morse: &mut [U]) -> Result<usize, CodecError> {
    let mut cursor = BitCursor::new(morse);
    let mut pos = skip_separators(text, 0);
    let mut prev_was_alnum = false;

    loop {
        let code = match text.get(pos) {
            None => char_to_code(TERMINATOR),
            Some(b) if b.is_ascii_alphanumeric() => char_to_code(b.to_ascii_uppercase() as char),
            Some(_) => None,
        };

        match code {
            Some(code) => {
                for symbol in code.bytes() {
                    let mark = if symbol == DOT { DOT_BITS } else { DASH_BITS };
                    cursor.emit(true, mark)?;
                    cursor.emit(false, SYMBOL_GAP_BITS)?;
                }
                cursor.emit(false, CHAR_GAP_EXTENSION_BITS)?;

                if pos >= text.len() {
                    break;
                }
                prev_was_alnum = true;
                pos += 1;
            }
            None => {
                if prev_was_alnum {
                    cursor.emit(false, WORD_GAP_EXTENSION_BITS)?;
                }
                pos = skip_separators(text, pos);
                prev_was_alnum = false;
            }
        }
    }

    Ok(cursor.finish())
}

/// Encodes `text` into a freshly allocated buffer sized by
/// [`encoded_capacity`] and truncated to the units used.
pub fn encode<U: Unit>(text: &[u8]) -> Result<Vec<U>, CodecError> {
    let mut morse = vec![U::CLEAR; encoded_capacity::<U>(text.len())?];
    let used = encode_into(text, &mut morse)?;
    morse.truncate(used);
    Ok(morse)
}
