//! Bit addressing over a buffer of fixed-width units.
//!
//! A *bit offset* is a zero-based index into a unit buffer. Offset `o` lives in
//! unit `o >> U::LOG2` at intra-unit index `o & (U::WIDTH - 1)`, and index 0 is
//! the most significant bit of the unit. Given `[0xB1, 0xC7]`
//! (`0b1011_0001, 0b1100_0111`) the bits at offsets 0..16 read
//! `1011 0001 1100 0111`.
//!
//! This is the same ordering as `bitvec`'s `Msb0`, so run scanning and run
//! filling are delegated to a `BitSlice<U, Msb0>` view of the buffer, while
//! single-bit access goes through the explicit mask arithmetic below.
//!
//! Functions that take a bit offset panic if the offset lies outside the
//! buffer, like slice indexing. [`run_length`] is the exception: an offset
//! past the end is a defined empty run.

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, Not, Shl};

use bitvec::prelude::*;

/// Returns `log2(power_of_2)`.
///
/// # Panics
/// If `power_of_2` is not a power of two.
pub const fn log2_power_of_2(power_of_2: usize) -> u32 {
    assert!(power_of_2.is_power_of_two(), "not a power of two");
    power_of_2.trailing_zeros()
}

/// A storage word that the codec can address bit by bit.
///
/// Implemented for the unsigned integers that `bitvec` can view as registers.
pub trait Unit:
    BitStore
    + Copy
    + Default
    + Eq
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<usize, Output = Self>
{
    /// Number of bits in one unit.
    const WIDTH: usize;
    /// `log2(WIDTH)`, used to split bit offsets.
    const LOG2: u32 = log2_power_of_2(Self::WIDTH);
    /// No bits set.
    const CLEAR: Self;
    /// Only the least significant bit set.
    const LSB: Self;
}

macro_rules! impl_unit {
    ($($t:ty),*) => {
        $(
            impl Unit for $t {
                const WIDTH: usize = core::mem::size_of::<$t>() * 8;
                const CLEAR: Self = 0;
                const LSB: Self = 1;
            }
        )*
    };
}

impl_unit!(u8, u16, u32);
#[cfg(target_pointer_width = "64")]
impl_unit!(u64);

/// Returns a unit with only the bit at `bit_index` set, where index 0 is the
/// most significant bit.
///
/// `bit_mask::<u8>(0) == 0x80`, `bit_mask::<u16>(0) == 0x8000`,
/// `bit_mask::<u8>(2) == 0x20`.
#[inline]
pub fn bit_mask<U: Unit>(bit_index: usize) -> U {
    debug_assert!(bit_index < U::WIDTH);
    U::LSB << (U::WIDTH - 1 - bit_index)
}

/// The intra-unit part of `bit_offset`.
#[inline]
pub fn bit_index<U: Unit>(bit_offset: usize) -> usize {
    bit_offset & (U::WIDTH - 1)
}

/// The unit part of `bit_offset`.
#[inline]
pub fn unit_offset<U: Unit>(bit_offset: usize) -> usize {
    bit_offset >> U::LOG2
}

/// Number of addressable bits in `n_units` units.
#[inline]
pub fn bit_capacity<U: Unit>(n_units: usize) -> usize {
    n_units << U::LOG2
}

/// Number of units needed to hold `n_bits` bits; a partial unit counts as one.
#[inline]
pub fn units_for_bits<U: Unit>(n_bits: usize) -> usize {
    n_bits.div_ceil(U::WIDTH)
}

/// Returns the bit at `bit_offset`.
#[inline]
pub fn get_bit<U: Unit>(units: &[U], bit_offset: usize) -> bool {
    let mask = bit_mask::<U>(bit_index::<U>(bit_offset));
    units[unit_offset::<U>(bit_offset)] & mask != U::CLEAR
}

/// Sets the bit at `bit_offset` to `bit`, leaving every other bit untouched.
#[inline]
pub fn set_bit<U: Unit>(units: &mut [U], bit_offset: usize, bit: bool) {
    let mask = bit_mask::<U>(bit_index::<U>(bit_offset));
    let unit = &mut units[unit_offset::<U>(bit_offset)];
    *unit = if bit { *unit | mask } else { *unit & !mask };
}

/// Sets `count` bits starting at `bit_offset` to `bit` and returns the offset
/// one past the last bit written, so calls can be chained as a cursor.
#[inline]
pub fn set_bits<U: Unit>(units: &mut [U], bit_offset: usize, bit: bool, count: usize) -> usize {
    let end = bit_offset + count;
    units.view_bits_mut::<Msb0>()[bit_offset..end].fill(bit);
    end
}

/// Returns the length of the run of identical bits starting at `bit_offset`
/// within the first `n_units` units.
///
/// Returns 0 when `bit_offset` is at or past `n_units * U::WIDTH`. Bits beyond
/// the first `n_units` units are never examined.
pub fn run_length<U: Unit>(units: &[U], n_units: usize, bit_offset: usize) -> usize {
    let max_bits = bit_capacity::<U>(n_units.min(units.len()));
    if bit_offset >= max_bits {
        return 0;
    }

    let rest = &units.view_bits::<Msb0>()[bit_offset..max_bits];
    let end = if rest[0] {
        rest.first_zero()
    } else {
        rest.first_one()
    };
    end.unwrap_or(rest.len())
}
