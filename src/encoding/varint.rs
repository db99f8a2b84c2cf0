// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Variable-width integer primitives.
//!
//! Unsigned integers wider than 8 bits are written as LEB128: seven payload
//! bits per byte, least significant group first, high bit set on every byte
//! except the last. Signed integers are zig-zag mapped first so that small
//! negative numbers stay short.
//!
//! | value | bytes |
//! |---|---|
//! | `0u32` | `00` |
//! | `127u32` | `7f` |
//! | `128u32` | `80 01` |
//! | `-1i32` | `01` |
//! | `1i32` | `02` |

use std::io::{self, Write};

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Why a varint could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// Input ended before the terminating byte
    Truncated,
    /// Too many continuation bytes or value wider than the target type
    Overflow,
}

/// Maximum number of bytes a varint of `bits` width may occupy.
pub const fn max_len(bits: u32) -> usize {
    bits.div_ceil(7) as usize
}

/// Encode `value` into a stack buffer, returning the buffer and used length.
pub fn encode_uvarint(mut value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf[len] = byte;
            len += 1;
            return (buf, len);
        }
        buf[len] = byte | 0x80;
        len += 1;
    }
}

/// Write `value` as LEB128, returning the number of bytes written.
pub fn write_uvarint<W: Write + ?Sized>(w: &mut W, value: u64) -> io::Result<usize> {
    let (buf, len) = encode_uvarint(value);
    w.write_all(&buf[..len])?;
    Ok(len)
}

/// Read a LEB128 value of at most `bits` width from the front of `data`.
///
/// Returns the value and the number of bytes consumed.
pub fn read_uvarint(data: &[u8], bits: u32) -> Result<(u64, usize), VarintError> {
    let limit = max_len(bits);
    let mut value: u64 = 0;
    for i in 0..limit {
        let byte = *data.get(i).ok_or(VarintError::Truncated)?;
        let group = (byte & 0x7f) as u64;
        let shift = 7 * i as u32;
        if shift == 63 && group > 1 {
            return Err(VarintError::Overflow);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            if bits < 64 && value >> bits != 0 {
                return Err(VarintError::Overflow);
            }
            return Ok((value, i + 1));
        }
    }
    Err(VarintError::Overflow)
}

/// Map a signed value onto an unsigned one so small magnitudes stay small.
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
