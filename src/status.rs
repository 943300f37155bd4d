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

//! Fast path for the `:status` pseudo-header of a response head.
//!
//! The seven status codes present in the static table are emitted as a
//! single indexed octet; every other code falls back to a literal without
//! indexing that references the `:status` name row and carries the ASCII
//! decimal digits as its value.

use crate::integer::{encode_integer, integer_len};
use crate::representation::{PrefixBit, PrefixIndexMask};
use crate::strings;

/// Static table index of the `:status: 200` row, used as the name
/// reference for codes outside the static table.
const STATUS_NAME_INDEX: usize = 8;

/// Writes the `:status` pseudo-header for the given status code.
///
/// Returns the number of octets written, or `None` if `dst` is too short;
/// nothing is written in that case.
pub fn encode_status_code(status: u16, dst: &mut [u8]) -> Option<usize> {
    if let Some(index) = static_status_index(status) {
        return encode_integer(
            index,
            PrefixIndexMask::INDEXED.0,
            PrefixBit::INDEXED.0,
            dst,
        );
    }

    let mut digits = [0u8; 5];
    let digits = format_status(status, &mut digits);
    let total = integer_len(STATUS_NAME_INDEX, PrefixIndexMask::LITERAL_WITHOUT_INDEXING.0)
        + strings::octets_len(digits.len());
    if dst.len() < total {
        return None;
    }
    let cur = encode_integer(
        STATUS_NAME_INDEX,
        PrefixIndexMask::LITERAL_WITHOUT_INDEXING.0,
        PrefixBit::LITERAL_WITHOUT_INDEXING.0,
        dst,
    )?;
    strings::encode_octets(digits, &mut dst[cur..])?;
    Some(total)
}

/// Static table index of a well-known status code.
fn static_status_index(status: u16) -> Option<usize> {
    match status {
        200 => Some(8),
        204 => Some(9),
        206 => Some(10),
        304 => Some(11),
        400 => Some(12),
        404 => Some(13),
        500 => Some(14),
        _ => None,
    }
}

/// Formats a status code as ASCII decimal digits into `buf`.
fn format_status(status: u16, buf: &mut [u8; 5]) -> &[u8] {
    let mut rest = status;
    let mut cur = buf.len();
    loop {
        cur -= 1;
        buf[cur] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    &buf[cur..]
}
