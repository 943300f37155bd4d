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

//! Encoder implementation of [HPACK].
//!
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//!
//! The encoder owns the dynamic table of one HTTP/2 connection direction
//! and turns ordered header lists into [header field representations]. The
//! caller supplies every destination buffer; a write that does not fit
//! consumes nothing and leaves the encoder untouched, so it can be retried
//! against a fresh buffer. Block encoding resumes through an
//! [`EncodeSession`] held by the caller.
//!
//! [header field representations]: https://www.rfc-editor.org/rfc/rfc7541.html#section-6

use std::borrow::Cow;

use tracing::debug;

use crate::error::HpackError;
use crate::integer::{encode_integer, integer_len};
use crate::representation::{PrefixBit, PrefixIndexMask};
use crate::strings;
use crate::table::{DynamicTable, HeaderField, LookupResult, StaticTable, TableIndex};

/// Initial maximum size of the dynamic table in RFC cost units, per
/// `RFC7541 section-6.5.2` of HTTP/2 (`SETTINGS_HEADER_TABLE_SIZE`).
pub const DEFAULT_MAX_TABLE_SIZE: usize = 4096;

/// Encoder implementation of [`HPACK`].
///
/// [`HPACK`]: https://httpwg.org/specs/rfc7541.html
///
/// One encoder serves exactly one HTTP/2 connection direction; the owning
/// connection serializes all calls. Strings are emitted in the raw form
/// with the `H` bit cleared.
pub struct HpackEncoder {
    table: DynamicTable,
    max_size_limit: usize,
    pending_size_update: Option<usize>,
}

impl HpackEncoder {
    /// Creates a `HpackEncoder` with the given maximum dynamic table size.
    /// The value also caps later size updates.
    pub fn new(max_size: usize) -> Self {
        Self {
            table: DynamicTable::with_max_size(max_size),
            max_size_limit: max_size,
            pending_size_update: None,
        }
    }

    /// Current size of the dynamic table in RFC cost units.
    pub fn dynamic_table_size(&self) -> usize {
        self.table.curr_size()
    }

    /// Current size limit of the dynamic table in RFC cost units.
    pub fn max_dynamic_table_size(&self) -> usize {
        self.table.max_size()
    }

    /// Gets the header field at the given combined index: 1 to 61 address
    /// the static table, 62 and above the dynamic table with 62 denoting
    /// the most recently inserted entry.
    pub fn header_at(&self, index: usize) -> Option<(&str, &str)> {
        match StaticTable::get(index) {
            Some(entry) => Some(entry),
            None => self
                .table
                .get(index)
                .map(|field| (field.name(), field.value())),
        }
    }

    /// Searches the static and dynamic tables for the header field. The
    /// name is matched in its lower-cased form. The returned combined
    /// indices stay valid until the next table mutation.
    pub fn lookup(&self, name: &str, value: &str) -> LookupResult {
        let name = fold_name(name);
        let (s_exact, s_name) = match StaticTable::index(&name, value) {
            Some(TableIndex::Field(index)) => (Some(index), Some(index)),
            Some(TableIndex::Name(index)) => (None, Some(index)),
            None => (None, None),
        };
        let dynamic = self.table.lookup(&name, Some(value));
        LookupResult {
            exact: s_exact.or(dynamic.exact),
            name_only: s_name.or(dynamic.name_only),
        }
    }

    /// Writes an `Indexed Header Field` representation
    /// (`RFC7541 section-6.1`).
    ///
    /// Returns the number of octets written, or `None` if `dst` is too
    /// short; nothing is written in that case.
    pub fn encode_indexed_header_field(&self, index: usize, dst: &mut [u8]) -> Option<usize> {
        encode_integer(
            index,
            PrefixIndexMask::INDEXED.0,
            PrefixBit::INDEXED.0,
            dst,
        )
    }

    /// Writes the header field using the result of a prior
    /// [`HpackEncoder::lookup`]: the indexed representation on an exact
    /// hit, otherwise a `Literal Header Field with Incremental Indexing`
    /// (`RFC7541 section-6.2.1`) with an indexed or literal name.
    ///
    /// Both literal forms insert the field into the dynamic table, after
    /// the octets are committed to `dst`. Literal names are lower-cased
    /// and must be ASCII; the value is copied untouched.
    pub fn encode_literal_field(
        &mut self,
        lookup: &LookupResult,
        name: &str,
        value: &str,
        dst: &mut [u8],
    ) -> Result<Option<usize>, HpackError> {
        if let Some(index) = lookup.exact {
            return Ok(self.encode_indexed_header_field(index, dst));
        }
        let written = match lookup.name_only {
            Some(index) => literal_with_indexing(index, value, dst),
            None => literal_with_indexing_new_name(name, value, dst)?,
        };
        if written.is_some() {
            self.table
                .insert(HeaderField::new(fold_name(name).into_owned(), value));
        }
        Ok(written)
    }

    /// Writes a `Literal Header Field without Indexing` representation
    /// (`RFC7541 section-6.2.2`) with an indexed name. The dynamic table
    /// is not touched, for values that must not be cached.
    pub fn encode_literal_without_indexing(
        &self,
        index: usize,
        value: &str,
        dst: &mut [u8],
    ) -> Option<usize> {
        let total = integer_len(index, PrefixIndexMask::LITERAL_WITHOUT_INDEXING.0)
            + strings::octets_len(value.len());
        if dst.len() < total {
            return None;
        }
        let cur = encode_integer(
            index,
            PrefixIndexMask::LITERAL_WITHOUT_INDEXING.0,
            PrefixBit::LITERAL_WITHOUT_INDEXING.0,
            dst,
        )?;
        strings::encode_octets(value.as_bytes(), &mut dst[cur..])?;
        Some(total)
    }

    /// Writes a `Literal Header Field without Indexing` representation
    /// (`RFC7541 section-6.2.2`) with a literal name and a value joined
    /// from `values` with `separator` between them.
    ///
    /// The name is lower-cased and must be ASCII; the joined values are
    /// copied as-is; the separator must be ASCII.
    pub fn encode_literal_without_indexing_new_name(
        &self,
        name: &str,
        values: &[&str],
        separator: &str,
        dst: &mut [u8],
    ) -> Result<Option<usize>, HpackError> {
        if !name.is_ascii() {
            return Err(HpackError::InvalidCharEncoding);
        }
        let joined = strings::joined_literal_len(values, separator).map_err(boundary_error)?;
        let total = 1usize
            .checked_add(strings::octets_len(name.len()))
            .and_then(|len| len.checked_add(joined))
            .ok_or(HpackError::EncodingFailure)?;
        if dst.len() < total {
            return Ok(None);
        }
        dst[0] = PrefixBit::LITERAL_WITHOUT_INDEXING.0;
        let mut cur = 1;
        let Some(size) = strings::encode_string_literal(name, &mut dst[cur..], true, true)? else {
            return Ok(None);
        };
        cur += size;
        let written = strings::encode_joined_string_literal(values, separator, &mut dst[cur..])
            .map_err(boundary_error)?;
        if written.is_none() {
            return Ok(None);
        }
        Ok(Some(total))
    }

    /// One-shot variant of
    /// [`HpackEncoder::encode_literal_without_indexing_new_name`] for
    /// fields too long for a caller scratch buffer. Retries with a
    /// doubling buffer until the representation fits and returns the
    /// trimmed octets.
    pub fn encode_literal_without_indexing_new_name_to_vec(
        &self,
        name: &str,
        values: &[&str],
        separator: &str,
    ) -> Result<Vec<u8>, HpackError> {
        let mut buf = vec![0u8; 64];
        loop {
            match self.encode_literal_without_indexing_new_name(name, values, separator, &mut buf)?
            {
                Some(size) => {
                    buf.truncate(size);
                    return Ok(buf);
                }
                None => {
                    let grown = buf.len() * 2;
                    buf.resize(grown, 0);
                }
            }
        }
    }

    /// Writes a `Literal Header Field Never Indexed` representation
    /// (`RFC7541 section-6.2.3`) with an indexed name, for values that
    /// intermediaries must not re-encode.
    pub fn encode_literal_never_indexed(
        &self,
        index: usize,
        value: &str,
        dst: &mut [u8],
    ) -> Option<usize> {
        let total = integer_len(index, PrefixIndexMask::LITERAL_NEVER_INDEXED.0)
            + strings::octets_len(value.len());
        if dst.len() < total {
            return None;
        }
        let cur = encode_integer(
            index,
            PrefixIndexMask::LITERAL_NEVER_INDEXED.0,
            PrefixBit::LITERAL_NEVER_INDEXED.0,
            dst,
        )?;
        strings::encode_octets(value.as_bytes(), &mut dst[cur..])?;
        Some(total)
    }

    /// Writes a `Literal Header Field Never Indexed` representation
    /// (`RFC7541 section-6.2.3`) with a literal name.
    pub fn encode_literal_never_indexed_new_name(
        &self,
        name: &str,
        value: &str,
        dst: &mut [u8],
    ) -> Result<Option<usize>, HpackError> {
        if !name.is_ascii() {
            return Err(HpackError::InvalidCharEncoding);
        }
        let total = 1 + strings::octets_len(name.len()) + strings::octets_len(value.len());
        if dst.len() < total {
            return Ok(None);
        }
        dst[0] = PrefixBit::LITERAL_NEVER_INDEXED.0;
        let mut cur = 1;
        let Some(size) = strings::encode_string_literal(name, &mut dst[cur..], true, true)? else {
            return Ok(None);
        };
        cur += size;
        if strings::encode_octets(value.as_bytes(), &mut dst[cur..]).is_none() {
            return Ok(None);
        }
        Ok(Some(total))
    }

    /// Updates the maximum size of the dynamic table.
    ///
    /// Fails with [`HpackError::SizeUpdateExceedsMax`] above the size the
    /// encoder was constructed with. Reductions collapse to the smallest
    /// value set since the last header block; an increase following a
    /// reduction does not override it, so the peer always learns the
    /// smallest intermediate size (`RFC7541 section-4.2`).
    pub fn set_max_dynamic_table_size(&mut self, new_size: usize) -> Result<(), HpackError> {
        if new_size > self.max_size_limit {
            return Err(HpackError::SizeUpdateExceedsMax);
        }
        if self.pending_size_update.map_or(true, |pending| new_size < pending) {
            debug!(max_size = new_size, "size update scheduled");
            self.pending_size_update = Some(new_size);
            self.table.resize(new_size);
        }
        Ok(())
    }

    /// Writes the pending `Dynamic Table Size Update` instruction
    /// (`RFC7541 section-6.3`), which must form the first octets of the
    /// next header block. Returns `Some(0)` when no update is pending and
    /// clears the pending state once the octets are committed.
    pub fn write_headers_begin(&mut self, dst: &mut [u8]) -> Option<usize> {
        let Some(new_size) = self.pending_size_update else {
            return Some(0);
        };
        let written = encode_integer(
            new_size,
            PrefixIndexMask::SIZE_UPDATE.0,
            PrefixBit::SIZE_UPDATE.0,
            dst,
        )?;
        debug!(max_size = new_size, "size update flushed");
        self.pending_size_update = None;
        Some(written)
    }

    /// Encodes a header block, resuming from `session`.
    ///
    /// The pending size update is flushed once per session, then fields
    /// are emitted in order with the stateful
    /// [`HpackEncoder::encode_literal_field`] choice. A field that does
    /// not fit ends the call with the octets written so far; the caller
    /// checks [`EncodeSession::is_finished`] and calls again with a fresh
    /// buffer. A call that cannot make any progress returns
    /// [`HpackError::EncodingFailure`] when `fail_on_no_progress` is set,
    /// so an impossibly small buffer does not spin forever.
    pub fn encode_block(
        &mut self,
        fields: &[HeaderField],
        session: &mut EncodeSession,
        dst: &mut [u8],
        fail_on_no_progress: bool,
    ) -> Result<usize, HpackError> {
        let mut cur = 0;
        if !session.prelude_sent {
            match self.write_headers_begin(dst) {
                Some(size) => {
                    cur += size;
                    session.prelude_sent = true;
                }
                None => {
                    return if fail_on_no_progress {
                        Err(HpackError::EncodingFailure)
                    } else {
                        Ok(0)
                    };
                }
            }
        }
        while session.position < fields.len() {
            let field = &fields[session.position];
            let lookup = self.lookup(field.name(), field.value());
            match self.encode_literal_field(&lookup, field.name(), field.value(), &mut dst[cur..])?
            {
                Some(size) => {
                    cur += size;
                    session.position += 1;
                }
                None => break,
            }
        }
        if session.position == fields.len() {
            session.finished = true;
        }
        if cur == 0 && !session.finished && fail_on_no_progress {
            return Err(HpackError::EncodingFailure);
        }
        Ok(cur)
    }
}

impl Default for HpackEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TABLE_SIZE)
    }
}

/// Progress of one header block through [`HpackEncoder::encode_block`].
/// Held by the caller, one per block; a fresh block starts with a fresh
/// session.
#[derive(Debug, Default)]
pub struct EncodeSession {
    position: usize,
    prelude_sent: bool,
    finished: bool,
}

impl EncodeSession {
    /// Creates a session at the start of a header block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields fully emitted so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the whole block, prelude included, has been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// `Literal Header Field with Incremental Indexing -- Indexed Name`.
fn literal_with_indexing(index: usize, value: &str, dst: &mut [u8]) -> Option<usize> {
    let total = integer_len(index, PrefixIndexMask::LITERAL_WITH_INDEXING.0)
        + strings::octets_len(value.len());
    if dst.len() < total {
        return None;
    }
    let cur = encode_integer(
        index,
        PrefixIndexMask::LITERAL_WITH_INDEXING.0,
        PrefixBit::LITERAL_WITH_INDEXING.0,
        dst,
    )?;
    strings::encode_octets(value.as_bytes(), &mut dst[cur..])?;
    Some(total)
}

/// `Literal Header Field with Incremental Indexing -- New Name`.
fn literal_with_indexing_new_name(
    name: &str,
    value: &str,
    dst: &mut [u8],
) -> Result<Option<usize>, HpackError> {
    if !name.is_ascii() {
        return Err(HpackError::InvalidCharEncoding);
    }
    let total = 1 + strings::octets_len(name.len()) + strings::octets_len(value.len());
    if dst.len() < total {
        return Ok(None);
    }
    dst[0] = PrefixBit::LITERAL_WITH_INDEXING.0;
    let mut cur = 1;
    let Some(size) = strings::encode_string_literal(name, &mut dst[cur..], true, true)? else {
        return Ok(None);
    };
    cur += size;
    if strings::encode_octets(value.as_bytes(), &mut dst[cur..]).is_none() {
        return Ok(None);
    }
    Ok(Some(total))
}

/// Lower-cases a header name, borrowing when it already is.
fn fold_name(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|byte| byte.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Keeps internal arithmetic failures out of the encoder interface.
fn boundary_error(err: HpackError) -> HpackError {
    match err {
        HpackError::IntegerOverflow => HpackError::EncodingFailure,
        other => other,
    }
}

#[cfg(test)]
mod ut_hpack_encoder {
    use super::{EncodeSession, HpackEncoder};
    use crate::error::HpackError;
    use crate::table::HeaderField;
    use crate::util::hex_to_vec;

    /// UT test cases for `HpackEncoder::encode_block`.
    ///
    /// # Brief
    /// 1. Encodes the header blocks of RFC7541 Appendix C through one
    ///    encoder per sequence.
    /// 2. Checks the emitted octets and the dynamic table size.
    #[test]
    fn ut_hpack_encoder_block() {
        rfc7541_test_cases();

        macro_rules! block_test_cases {
            ($enc: expr, $res: literal, $size: expr, { $($n: literal, $v: literal $(,)?)* } $(,)?) => {
                let encoder = $enc;
                let fields = vec![$(HeaderField::new($n, $v),)*];
                let mut session = EncodeSession::new();
                let mut dst = [0u8; 128];
                let size = encoder
                    .encode_block(&fields, &mut session, &mut dst, true)
                    .unwrap();
                assert!(session.is_finished());
                let expected = hex_to_vec($res);
                assert_eq!(&dst[..size], expected.as_slice());
                assert_eq!(encoder.dynamic_table_size(), $size);
            }
        }

        /// The following test cases are from RFC7541.
        fn rfc7541_test_cases() {
            // C.2.1. Literal Header Field with Indexing
            block_test_cases!(
                &mut HpackEncoder::new(4096),
                "400a637573746f6d2d6b65790d637573746f6d2d686561646572", 55,
                {
                    "custom-key", "custom-header",
                },
            );

            // C.2.4. Indexed Header Field
            block_test_cases!(
                &mut HpackEncoder::new(4096),
                "82", 0,
                {
                    ":method", "GET",
                },
            );

            // C.3. Request Examples without Huffman Coding
            {
                let mut encoder = HpackEncoder::new(4096);
                // C.3.1. First Request
                block_test_cases!(
                    &mut encoder,
                    "828684410f7777772e6578616d706c652e636f6d", 57,
                    {
                        ":method", "GET",
                        ":scheme", "http",
                        ":path", "/",
                        ":authority", "www.example.com",
                    },
                );

                // C.3.2. Second Request
                block_test_cases!(
                    &mut encoder,
                    "828684be58086e6f2d6361636865", 110,
                    {
                        ":method", "GET",
                        ":scheme", "http",
                        ":path", "/",
                        ":authority", "www.example.com",
                        "cache-control", "no-cache",
                    },
                );

                // C.3.3. Third Request
                block_test_cases!(
                    &mut encoder,
                    "828785bf400a637573746f6d2d6b65790c637573746f6d2d76616c7565", 164,
                    {
                        ":method", "GET",
                        ":scheme", "https",
                        ":path", "/index.html",
                        ":authority", "www.example.com",
                        "custom-key", "custom-value",
                    },
                );
            }

            // C.5. Response Examples without Huffman Coding
            {
                let mut encoder = HpackEncoder::new(256);
                // C.5.1. First Response
                block_test_cases!(
                    &mut encoder,
                    "4803333032580770726976617465611d\
                    4d6f6e2c203231204f63742032303133\
                    2032303a31333a323120474d546e1768\
                    747470733a2f2f7777772e6578616d70\
                    6c652e636f6d",
                    222,
                    {
                        ":status", "302",
                        "cache-control", "private",
                        "date", "Mon, 21 Oct 2013 20:13:21 GMT",
                        "location", "https://www.example.com",
                    },
                );

                // C.5.2. Second Response
                block_test_cases!(
                    &mut encoder,
                    "4803333037c1c0bf", 222,
                    {
                        ":status", "307",
                        "cache-control", "private",
                        "date", "Mon, 21 Oct 2013 20:13:21 GMT",
                        "location", "https://www.example.com",
                    },
                );

                // C.5.3. Third Response
                block_test_cases!(
                    &mut encoder,
                    "88c1611d4d6f6e2c203231204f637420\
                    323031332032303a31333a323220474d\
                    54c05a04677a69707738666f6f3d4153\
                    444a4b48514b425a584f5157454f5049\
                    5541585157454f49553b206d61782d61\
                    67653d333630303b2076657273696f6e\
                    3d31",
                    215,
                    {
                        ":status", "200",
                        "cache-control", "private",
                        "date", "Mon, 21 Oct 2013 20:13:22 GMT",
                        "location", "https://www.example.com",
                        "content-encoding", "gzip",
                        "set-cookie", "foo=ASDJKHQKBZXOQWEOPIUAXQWEOIU; max-age=3600; version=1",
                    },
                );
            }
        }
    }

    /// UT test cases for `HpackEncoder::encode_literal_field`.
    ///
    /// # Brief
    /// 1. Encodes a fresh pair and checks the new-name literal form.
    /// 2. Encodes the same pair again and checks the indexed form against
    ///    the newest dynamic table entry.
    #[test]
    fn ut_hpack_encoder_literal_field() {
        let mut encoder = HpackEncoder::new(4096);
        let mut dst = [0u8; 32];

        let lookup = encoder.lookup("name", "value");
        assert_eq!(lookup.exact, None);
        assert_eq!(lookup.name_only, None);
        let size = encoder
            .encode_literal_field(&lookup, "name", "value", &mut dst)
            .unwrap()
            .unwrap();
        assert_eq!(
            &dst[..size],
            hex_to_vec("40046e616d650576616c7565").as_slice()
        );
        assert_eq!(encoder.dynamic_table_size(), 41);

        let lookup = encoder.lookup("name", "value");
        assert_eq!(lookup.exact, Some(62));
        let size = encoder
            .encode_literal_field(&lookup, "name", "value", &mut dst)
            .unwrap()
            .unwrap();
        assert_eq!(&dst[..size], &[0xbe]);

        assert_eq!(encoder.header_at(2), Some((":method", "GET")));
        assert_eq!(encoder.header_at(62), Some(("name", "value")));
        assert_eq!(encoder.header_at(0), None);
        assert_eq!(encoder.header_at(64), None);
    }

    /// UT test cases for the name folding of the stateful encoding path.
    ///
    /// # Brief
    /// 1. Encodes a mixed-case name and checks the lower-cased octets.
    /// 2. Looks the pair up under a different casing and checks the hit.
    #[test]
    fn ut_hpack_encoder_name_folding() {
        let mut encoder = HpackEncoder::new(4096);
        let mut dst = [0u8; 32];

        let lookup = encoder.lookup("Custom-Key", "v");
        let size = encoder
            .encode_literal_field(&lookup, "Custom-Key", "v", &mut dst)
            .unwrap()
            .unwrap();
        assert_eq!(
            &dst[..size],
            hex_to_vec("400a637573746f6d2d6b65790176").as_slice()
        );

        assert_eq!(encoder.lookup("CUSTOM-KEY", "v").exact, Some(62));

        let lookup = encoder.lookup("naïve", "v");
        assert_eq!(
            encoder.encode_literal_field(&lookup, "naïve", "v", &mut dst),
            Err(HpackError::InvalidCharEncoding)
        );
    }

    /// UT test cases for the direct representation writers.
    ///
    /// # Brief
    /// 1. Writes indexed, without-indexing and never-indexed forms with
    ///    multi-octet indices.
    /// 2. Checks the emitted octets.
    #[test]
    fn ut_hpack_encoder_direct_representations() {
        let encoder = HpackEncoder::new(4096);
        let mut dst = [0u8; 32];

        let size = encoder.encode_indexed_header_field(0x0aaa, &mut dst).unwrap();
        assert_eq!(&dst[..size], hex_to_vec("ffab14").as_slice());

        let size = encoder
            .encode_literal_without_indexing(0x0aaa, "value", &mut dst)
            .unwrap();
        assert_eq!(
            &dst[..size],
            hex_to_vec("0f9b150576616c7565").as_slice()
        );

        let size = encoder
            .encode_literal_without_indexing_new_name("name", &["first", "second"], ";", &mut dst)
            .unwrap()
            .unwrap();
        assert_eq!(
            &dst[..size],
            hex_to_vec("00046e616d650c66697273743b7365636f6e64")
                .as_slice()
        );

        let size = encoder
            .encode_literal_never_indexed_new_name("password", "secret", &mut dst)
            .unwrap()
            .unwrap();
        assert_eq!(
            &dst[..size],
            hex_to_vec("100870617373776f726406736563726574")
                .as_slice()
        );

        let size = encoder
            .encode_literal_never_indexed(5, "x", &mut dst)
            .unwrap();
        assert_eq!(&dst[..size], hex_to_vec("150178").as_slice());

        // None of the direct writers touch the dynamic table.
        assert_eq!(encoder.dynamic_table_size(), 0);
    }

    /// UT test cases for `HpackEncoder::set_max_dynamic_table_size` and
    /// `HpackEncoder::write_headers_begin`.
    ///
    /// # Brief
    /// 1. Applies a sequence of size updates.
    /// 2. Checks that the next block starts with the smallest value set
    ///    and that at most one update is emitted.
    #[test]
    fn ut_hpack_encoder_size_update() {
        let mut encoder = HpackEncoder::new(4096);
        let mut dst = [0u8; 8];

        assert_eq!(
            encoder.set_max_dynamic_table_size(8192),
            Err(HpackError::SizeUpdateExceedsMax)
        );

        encoder.set_max_dynamic_table_size(1).unwrap();
        encoder.set_max_dynamic_table_size(2).unwrap();
        assert_eq!(encoder.max_dynamic_table_size(), 1);

        assert_eq!(encoder.write_headers_begin(&mut dst), Some(1));
        assert_eq!(dst[0], 0x21);
        // The pending update is cleared once flushed.
        assert_eq!(encoder.write_headers_begin(&mut dst), Some(0));

        // A multi-octet update octet sequence.
        let mut encoder = HpackEncoder::new(4096);
        encoder.set_max_dynamic_table_size(256).unwrap();
        let size = encoder.write_headers_begin(&mut dst).unwrap();
        assert_eq!(&dst[..size], hex_to_vec("3fe101").as_slice());
    }

    /// UT test cases for the write atomicity of the encoder.
    ///
    /// # Brief
    /// 1. Calls every writer against a destination that is one octet too
    ///    short.
    /// 2. Checks that the destination and the encoder state are untouched.
    #[test]
    fn ut_hpack_encoder_atomicity() {
        let mut encoder = HpackEncoder::new(4096);
        let mut dst = [0xeeu8; 11];

        let lookup = encoder.lookup("name", "value");
        // The new-name form needs 12 octets.
        assert_eq!(
            encoder.encode_literal_field(&lookup, "name", "value", &mut dst),
            Ok(None)
        );
        assert_eq!(dst, [0xee; 11]);
        assert_eq!(encoder.dynamic_table_size(), 0);

        let mut short = [0xeeu8; 2];
        assert_eq!(encoder.encode_indexed_header_field(0x0aaa, &mut short), None);
        assert_eq!(short, [0xee; 2]);

        encoder.set_max_dynamic_table_size(256).unwrap();
        assert_eq!(encoder.write_headers_begin(&mut short), None);
        assert_eq!(short, [0xee; 2]);
        // The update stays pending after the failed flush.
        let mut dst = [0u8; 3];
        assert_eq!(encoder.write_headers_begin(&mut dst), Some(3));
    }

    /// UT test cases for the partial progress of
    /// `HpackEncoder::encode_block`.
    ///
    /// # Brief
    /// 1. Encodes a block through destinations that hold one field at a
    ///    time.
    /// 2. Checks the resumed progress and the no-progress failure.
    #[test]
    fn ut_hpack_encoder_block_resume() {
        let mut encoder = HpackEncoder::new(4096);
        let fields = vec![
            HeaderField::new("custom-key", "custom-header"),
            HeaderField::new(":method", "GET"),
        ];

        let mut session = EncodeSession::new();
        let mut first = [0u8; 26];
        let size = encoder
            .encode_block(&fields, &mut session, &mut first, true)
            .unwrap();
        assert_eq!(size, 26);
        assert!(!session.is_finished());
        assert_eq!(session.position(), 1);

        let mut second = [0u8; 26];
        let size = encoder
            .encode_block(&fields, &mut session, &mut second, true)
            .unwrap();
        assert_eq!(size, 1);
        assert!(session.is_finished());
        assert_eq!(second[0], 0x82);

        // A buffer that cannot hold the first field fails on request.
        let mut encoder = HpackEncoder::new(4096);
        let mut session = EncodeSession::new();
        let mut tiny = [0u8; 3];
        assert_eq!(
            encoder.encode_block(&fields, &mut session, &mut tiny, true),
            Err(HpackError::EncodingFailure)
        );
        assert_eq!(
            encoder.encode_block(&fields, &mut session, &mut tiny, false),
            Ok(0)
        );
    }

    /// UT test cases for
    /// `HpackEncoder::encode_literal_without_indexing_new_name_to_vec`.
    ///
    /// # Brief
    /// 1. Encodes a field far longer than the initial allocation.
    /// 2. Checks the result against the fixed-buffer writer.
    #[test]
    fn ut_hpack_encoder_to_vec() {
        let encoder = HpackEncoder::new(4096);
        let long = "a".repeat(300);
        let buf = encoder
            .encode_literal_without_indexing_new_name_to_vec("host", &[long.as_str()], ";")
            .unwrap();

        let mut dst = [0u8; 512];
        let size = encoder
            .encode_literal_without_indexing_new_name("host", &[long.as_str()], ";", &mut dst)
            .unwrap()
            .unwrap();
        assert_eq!(buf.as_slice(), &dst[..size]);
    }
}
