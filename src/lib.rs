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

//! `ylong_hpack` provides the encoder side of [HPACK], the header
//! compression scheme of the [HTTP/2 protocol].
//!
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//! [HTTP/2 protocol]: https://httpwg.org/specs/rfc9113.html
//!
//! # Introduction
//! HPACK eliminates redundant header fields across the requests of a
//! connection by referencing shared static and dynamic table entries by
//! index and by emitting literal representations for the rest, with a
//! bounded memory requirement for use in constrained environments.
//!
//! This crate turns ordered lists of header name-value pairs into the
//! compact octet stream of a header block. The caller owns every
//! destination buffer: a representation that does not fit consumes no
//! octets and leaves the encoder unchanged, so the same write can be
//! retried against fresh memory, and a header block suspended on buffer
//! exhaustion resumes through an [`EncodeSession`]. Strings are emitted
//! in the raw (non-Huffman) form with the `H` bit cleared.
//!
//! One [`HpackEncoder`] serves exactly one HTTP/2 connection direction;
//! decoding a received header block is the peer's concern and is not
//! provided here.
//!
//! # Examples
//! ```
//! use ylong_hpack::{EncodeSession, HeaderField, HpackEncoder};
//!
//! let mut encoder = HpackEncoder::new(4096);
//! let fields = [
//!     HeaderField::new(":method", "GET"),
//!     HeaderField::new(":path", "/"),
//! ];
//! let mut session = EncodeSession::new();
//! let mut buf = [0u8; 64];
//! let size = encoder
//!     .encode_block(&fields, &mut session, &mut buf, true)
//!     .unwrap();
//! assert!(session.is_finished());
//! assert_eq!(&buf[..size], &[0x82, 0x84]);
//! ```

mod encoder;
mod error;
mod integer;
mod representation;
mod status;
mod strings;
mod table;

pub(crate) mod util;

pub use encoder::{EncodeSession, HpackEncoder, DEFAULT_MAX_TABLE_SIZE};
pub use error::HpackError;
pub use status::encode_status_code;
pub use strings::encode_string_literal;
pub use table::{HeaderField, LookupResult};
