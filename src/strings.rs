// Copyright (c) 2023 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [String Literal Representation] implementation of [HPACK].
//!
//! [String Literal Representation]: https://www.rfc-editor.org/rfc/rfc7541.html#section-5.2
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//!
//! # Binary Format
//! ```text
//!   0   1   2   3   4   5   6   7
//! +---+---+---+---+---+---+---+---+
//! | H |    String Length (7+)     |
//! +---+---------------------------+
//! |  String Data (Length octets)  |
//! +-------------------------------+
//! ```
//!
//! The `H` bit selects the Huffman form; this encoder always emits the raw
//! octet form with `H = 0`. Every write is atomic: a too-short destination
//! leaves it untouched.

use crate::error::HpackError;
use crate::integer::{encode_integer, integer_len};

/// Length-prefix mask of a string literal, 7 bits below the `H` bit.
const STRING_LENGTH_MASK: u8 = 0x7f;

/// `H = 0`, raw octets follow the length.
const RAW_OCTETS: u8 = 0x00;

/// Writes a length-prefixed string literal copying `src` verbatim.
///
/// Returns the number of octets written, or `None` if `dst` is too short.
pub(crate) fn encode_octets(src: &[u8], dst: &mut [u8]) -> Option<usize> {
    let total = octets_len(src.len());
    if dst.len() < total {
        return None;
    }
    let cur = encode_integer(src.len(), STRING_LENGTH_MASK, RAW_OCTETS, dst)?;
    dst[cur..cur + src.len()].copy_from_slice(src);
    Some(total)
}

/// Total octets `encode_octets` produces for a string of `len` octets.
pub(crate) fn octets_len(len: usize) -> usize {
    integer_len(len, STRING_LENGTH_MASK) + len
}

/// Writes a length-prefixed string literal transcoding `value`.
///
/// With `lowercase`, ASCII `A..Z` is folded to lower case during the copy.
/// With `only_ascii`, any code point outside the ASCII range fails with
/// [`HpackError::InvalidCharEncoding`].
///
/// Returns `Ok(None)` if `dst` is too short; nothing is written in that
/// case.
pub fn encode_string_literal(
    value: &str,
    dst: &mut [u8],
    lowercase: bool,
    only_ascii: bool,
) -> Result<Option<usize>, HpackError> {
    if only_ascii && !value.is_ascii() {
        return Err(HpackError::InvalidCharEncoding);
    }
    let src = value.as_bytes();
    let total = octets_len(src.len());
    if dst.len() < total {
        return Ok(None);
    }
    let Some(cur) = encode_integer(src.len(), STRING_LENGTH_MASK, RAW_OCTETS, dst) else {
        return Ok(None);
    };
    if lowercase {
        for (byte, slot) in src.iter().zip(dst[cur..].iter_mut()) {
            *slot = if byte.is_ascii_uppercase() {
                byte | 0x20
            } else {
                *byte
            };
        }
    } else {
        dst[cur..cur + src.len()].copy_from_slice(src);
    }
    Ok(Some(total))
}

/// Writes a single length-prefixed string literal formed by joining `values`
/// with `separator`.
///
/// The joined length is computed with checked addition and emitted once;
/// the segments follow in order with the separator between them. The values
/// are copied as-is; the separator must be ASCII.
pub(crate) fn encode_joined_string_literal(
    values: &[&str],
    separator: &str,
    dst: &mut [u8],
) -> Result<Option<usize>, HpackError> {
    if !separator.is_ascii() {
        return Err(HpackError::InvalidCharEncoding);
    }
    let joined = joined_len(values, separator)?;
    let total = integer_len(joined, STRING_LENGTH_MASK)
        .checked_add(joined)
        .ok_or(HpackError::IntegerOverflow)?;
    if dst.len() < total {
        return Ok(None);
    }
    let Some(mut cur) = encode_integer(joined, STRING_LENGTH_MASK, RAW_OCTETS, dst) else {
        return Ok(None);
    };
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            dst[cur..cur + separator.len()].copy_from_slice(separator.as_bytes());
            cur += separator.len();
        }
        dst[cur..cur + value.len()].copy_from_slice(value.as_bytes());
        cur += value.len();
    }
    Ok(Some(total))
}

/// Total octets `encode_joined_string_literal` produces, length prefix
/// included. Rejects a non-ASCII separator at entry.
pub(crate) fn joined_literal_len(values: &[&str], separator: &str) -> Result<usize, HpackError> {
    if !separator.is_ascii() {
        return Err(HpackError::InvalidCharEncoding);
    }
    let joined = joined_len(values, separator)?;
    integer_len(joined, STRING_LENGTH_MASK)
        .checked_add(joined)
        .ok_or(HpackError::IntegerOverflow)
}

/// Joined octet count of `values` interleaved with `separator`.
fn joined_len(values: &[&str], separator: &str) -> Result<usize, HpackError> {
    let mut len = 0usize;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            len = len
                .checked_add(separator.len())
                .ok_or(HpackError::IntegerOverflow)?;
        }
        len = len
            .checked_add(value.len())
            .ok_or(HpackError::IntegerOverflow)?;
    }
    Ok(len)
}
