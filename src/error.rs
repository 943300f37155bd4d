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

//! Errors that may occur while encoding a header block.
//!
//! A destination buffer that is too short is *not* an error: every write
//! interface reports it as `None` (or `Ok(None)`) with zero bytes consumed,
//! so the caller can retry with a fresh buffer. The variants below are the
//! conditions that cannot be resolved by retrying.

use core::fmt::{Debug, Display, Formatter};
use std::error::Error;

/// Errors surfaced by the encoder. None of them corrupt encoder state.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum HpackError {
    /// The destination buffer cannot hold even a single representation of a
    /// non-empty header list and the caller asked to fail on no progress.
    /// Retrying with the same buffer would spin forever.
    EncodingFailure,

    /// A code point outside the ASCII range was supplied where ASCII is
    /// required: a literal header field name, an ASCII-only string literal,
    /// or a multi-value separator.
    InvalidCharEncoding,

    /// A [dynamic table size update] was requested above the maximum size
    /// the encoder was constructed with.
    ///
    /// [dynamic table size update]: https://www.rfc-editor.org/rfc/rfc7541.html#section-6.3
    SizeUpdateExceedsMax,

    /// The total length of a joined multi-value string overflowed the index
    /// type. Converted to [`HpackError::EncodingFailure`] before it reaches
    /// callers of the encoder interface.
    IntegerOverflow,
}

impl Display for HpackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl Error for HpackError {}
