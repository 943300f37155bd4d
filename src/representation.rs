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

//! [Binary format] constants of the [header field representations] and the
//! [dynamic table size update] instruction.
//!
//! [Binary format]: https://www.rfc-editor.org/rfc/rfc7541.html#section-6
//! [header field representations]: https://www.rfc-editor.org/rfc/rfc7541.html#section-3.2
//! [dynamic table size update]: https://www.rfc-editor.org/rfc/rfc7541.html#section-6.3
//!
//! Each representation starts with a fixed bit pattern in the high bits of
//! its first octet; the remaining low bits are the prefix of an integer
//! representation:
//!
//! ```text
//!   0   1   2   3   4   5   6   7
//! +---+---+---+---+---+---+---+---+
//! | PrefixBit |       Value       |
//! +---+---+---+-------------------+
//! ```

/// Leading bit pattern of a representation, pre-positioned in the high bits
/// of the first octet.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) struct PrefixBit(pub(crate) u8);

impl PrefixBit {
    pub(crate) const INDEXED: Self = Self(0x80);
    pub(crate) const LITERAL_WITH_INDEXING: Self = Self(0x40);
    pub(crate) const SIZE_UPDATE: Self = Self(0x20);
    pub(crate) const LITERAL_NEVER_INDEXED: Self = Self(0x10);
    pub(crate) const LITERAL_WITHOUT_INDEXING: Self = Self(0x00);
}

/// All-ones mask covering the integer prefix that follows a `PrefixBit`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) struct PrefixIndexMask(pub(crate) u8);

impl PrefixIndexMask {
    pub(crate) const INDEXED: Self = Self(0x7f);
    pub(crate) const LITERAL_WITH_INDEXING: Self = Self(0x3f);
    pub(crate) const SIZE_UPDATE: Self = Self(0x1f);
    pub(crate) const LITERAL_NEVER_INDEXED: Self = Self(0x0f);
    pub(crate) const LITERAL_WITHOUT_INDEXING: Self = Self(0x0f);
}
