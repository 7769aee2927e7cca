//! Text to Morse code and back, packed one timing element per bit.
//!
//! A dot is a single `1` bit and a dash is three. Symbols within a character
//! are separated by one `0`, characters by three and words by seven. Every
//! message ends with the AR prosign (`.-.-.`). Bits are addressed MSB first
//! within each storage unit; see [`bits`].
//!
//! ```
//! let morse = packed_morse::encode::<u8>(b"SOS").unwrap();
//! assert_eq!(morse, [0xa8, 0xee, 0xe2, 0xa2, 0xeb, 0xa0]);
//! assert_eq!(packed_morse::decode(&morse).unwrap(), b"SOS");
//! ```
//!
//! The `*_into` variants write into caller-owned buffers and never allocate;
//! size those buffers with [`encoded_capacity`] and [`decoded_capacity`].

pub mod bits;
mod decode;
mod encode;
mod error;
pub mod table;

pub use bits::Unit;
pub use decode::{decode, decode_into, decoded_capacity, DecodeOptions, Decoder};
pub use encode::{encode, encode_into, encoded_capacity};
pub use error::CodecError;
