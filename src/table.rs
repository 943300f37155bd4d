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

//! The [`Static Table`][static_table] and [`Dynamic Table`][dynamic_table]
//! implementation of [HPACK].
//!
//! [static_table]: https://httpwg.org/specs/rfc7541.html#static.table
//! [dynamic_table]: https://httpwg.org/specs/rfc7541.html#dynamic.table
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//!
//! Both tables share a single combined index space: indices 1 to 61 address
//! the static table, index 62 and above address the dynamic table with 62
//! denoting the most recently inserted entry. Index 0 is invalid.

use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use tracing::{debug, trace};

/// Lowest combined index addressing the dynamic table.
pub(crate) const DYNAMIC_TABLE_OFFSET: usize = STATIC_TABLE.len() + 1;

/// A header name-value pair stored in or looked up against the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    value: String,
}

impl HeaderField {
    /// Creates a `HeaderField` from a name and a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Header field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header field value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Size of this header field for dynamic table accounting.
    ///
    /// RFC7541-4.1: The additional 32 octets account for an estimated
    /// overhead associated with an entry.
    pub(crate) fn size(&self) -> usize {
        self.name.len() + self.value.len() + 32
    }
}

/// A hit in one of the tables: either a full name-value entry or a
/// name-only match.
pub(crate) enum TableIndex {
    Field(usize),
    Name(usize),
}

/// Combined static and dynamic table hits for one header field, expressed
/// as combined indices. Valid only until the next table mutation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupResult {
    /// Index of an entry matching both name and value.
    pub exact: Option<usize>,
    /// Index of an entry matching the name with any value.
    pub name_only: Option<usize>,
}

/// Static table entries defined by RFC 7541 Appendix A, indexed 1 to 61.
pub(crate) static STATIC_TABLE: [(&str, &str); 61] = [
    (":authority", ""),                    // 1
    (":method", "GET"),                    // 2
    (":method", "POST"),                   // 3
    (":path", "/"),                        // 4
    (":path", "/index.html"),              // 5
    (":scheme", "http"),                   // 6
    (":scheme", "https"),                  // 7
    (":status", "200"),                    // 8
    (":status", "204"),                    // 9
    (":status", "206"),                    // 10
    (":status", "304"),                    // 11
    (":status", "400"),                    // 12
    (":status", "404"),                    // 13
    (":status", "500"),                    // 14
    ("accept-charset", ""),                // 15
    ("accept-encoding", "gzip, deflate"),  // 16
    ("accept-language", ""),               // 17
    ("accept-ranges", ""),                 // 18
    ("accept", ""),                        // 19
    ("access-control-allow-origin", ""),   // 20
    ("age", ""),                           // 21
    ("allow", ""),                         // 22
    ("authorization", ""),                 // 23
    ("cache-control", ""),                 // 24
    ("content-disposition", ""),           // 25
    ("content-encoding", ""),              // 26
    ("content-language", ""),              // 27
    ("content-length", ""),                // 28
    ("content-location", ""),              // 29
    ("content-range", ""),                 // 30
    ("content-type", ""),                  // 31
    ("cookie", ""),                        // 32
    ("date", ""),                          // 33
    ("etag", ""),                          // 34
    ("expect", ""),                        // 35
    ("expires", ""),                       // 36
    ("from", ""),                          // 37
    ("host", ""),                          // 38
    ("if-match", ""),                      // 39
    ("if-modified-since", ""),             // 40
    ("if-none-match", ""),                 // 41
    ("if-range", ""),                      // 42
    ("if-unmodified-since", ""),           // 43
    ("last-modified", ""),                 // 44
    ("link", ""),                          // 45
    ("location", ""),                      // 46
    ("max-forwards", ""),                  // 47
    ("proxy-authenticate", ""),            // 48
    ("proxy-authorization", ""),           // 49
    ("range", ""),                         // 50
    ("referer", ""),                       // 51
    ("refresh", ""),                       // 52
    ("retry-after", ""),                   // 53
    ("server", ""),                        // 54
    ("set-cookie", ""),                    // 55
    ("strict-transport-security", ""),     // 56
    ("transfer-encoding", ""),             // 57
    ("user-agent", ""),                    // 58
    ("vary", ""),                          // 59
    ("via", ""),                           // 60
    ("www-authenticate", ""),              // 61
];

/// Inverted index over `STATIC_TABLE`, built once on first use.
struct StaticLookup {
    exact: HashMap<(&'static str, &'static str), usize>,
    name: HashMap<&'static str, usize>,
}

fn static_lookup() -> &'static StaticLookup {
    static LOOKUP: OnceLock<StaticLookup> = OnceLock::new();
    LOOKUP.get_or_init(|| {
        let mut exact = HashMap::new();
        let mut name = HashMap::new();
        for (i, (n, v)) in STATIC_TABLE.iter().enumerate() {
            exact.insert((*n, *v), i + 1);
            // The first row of a name carries its canonical index.
            name.entry(*n).or_insert(i + 1);
        }
        StaticLookup { exact, name }
    })
}

/// The [`Static Table`][static_table] of [HPACK].
///
/// [static_table]: https://httpwg.org/specs/rfc7541.html#static.table
/// [HPACK]: https://httpwg.org/specs/rfc7541.html
pub(crate) struct StaticTable;

impl StaticTable {
    /// Gets the entry at the given combined index (1 to 61).
    pub(crate) fn get(index: usize) -> Option<(&'static str, &'static str)> {
        match index {
            1..=61 => Some(STATIC_TABLE[index - 1]),
            _ => None,
        }
    }

    /// Tries to get the index of a lower-cased name and a value.
    pub(crate) fn index(name: &str, value: &str) -> Option<TableIndex> {
        let lookup = static_lookup();
        if let Some(&index) = lookup.exact.get(&(name, value)) {
            return Some(TableIndex::Field(index));
        }
        lookup.name.get(name).map(|&index| TableIndex::Name(index))
    }
}

/// The [`Dynamic Table`][dynamic_table] implementation of [HPACK].
///
/// [dynamic_table]: https://httpwg.org/specs/rfc7541.html#dynamic.table
/// [HPACK]: https://httpwg.org/specs/rfc7541.html
///
/// # Introduction
/// The dynamic table consists of a list of header fields maintained in
/// first-in, first-out order. The first and newest entry of a dynamic table
/// is at the lowest index, and the oldest entry of a dynamic table is at the
/// highest index.
///
/// The table is bounded by `max_size` in RFC cost units; inserting evicts
/// from the oldest end until the new entry fits. An entry larger than
/// `max_size` empties the table and is not stored.
///
/// Lookups go through a fingerprint index: both the name-value pair and the
/// bare name of every insertion are mapped to a monotonically increasing
/// insertion ordinal, translated to a live combined index at query time
/// through the running insertion counter. Eviction purges a fingerprint
/// only while it still points at the evicted ordinal, so a newer insertion
/// of the same key is never invalidated.
pub(crate) struct DynamicTable {
    queue: VecDeque<(HeaderField, u64)>,
    curr_size: usize,
    max_size: usize,
    insertions: u64,
    exact: HashMap<(String, String), u64>,
    names: HashMap<String, u64>,
}

impl DynamicTable {
    /// Creates a `Dynamic Table` based on the size limit.
    pub(crate) fn with_max_size(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size / 32),
            curr_size: 0,
            max_size,
            insertions: 0,
            exact: HashMap::new(),
            names: HashMap::new(),
        }
    }

    pub(crate) fn curr_size(&self) -> usize {
        self.curr_size
    }

    pub(crate) fn max_size(&self) -> usize {
        self.max_size
    }

    /// Gets the entry at the given combined index (62 and above).
    pub(crate) fn get(&self, index: usize) -> Option<&HeaderField> {
        self.queue
            .get(index.checked_sub(DYNAMIC_TABLE_OFFSET)?)
            .map(|(field, _)| field)
    }

    /// Searches for prior entries matching the name-value pair and the bare
    /// name. The returned combined indices are valid until the next
    /// mutation of the table.
    pub(crate) fn lookup(&self, name: &str, value: Option<&str>) -> LookupResult {
        let exact = value
            .and_then(|v| self.exact.get(&(name.to_string(), v.to_string())))
            .map(|&ordinal| self.index_of(ordinal));
        let name_only = self
            .names
            .get(name)
            .map(|&ordinal| self.index_of(ordinal));
        LookupResult { exact, name_only }
    }

    /// Inserts a header field at the head of the table, evicting from the
    /// tail until it fits. An entry larger than the whole table empties it
    /// and is discarded.
    pub(crate) fn insert(&mut self, field: HeaderField) {
        let entry_size = field.size();
        while self.curr_size + entry_size > self.max_size && !self.queue.is_empty() {
            self.evict_oldest();
        }
        if entry_size > self.max_size {
            debug!(
                size = entry_size,
                max_size = self.max_size,
                "entry exceeds the dynamic table, discarded"
            );
            return;
        }
        self.insertions += 1;
        trace!(name = field.name(), ordinal = self.insertions, "table insert");
        self.exact
            .insert((field.name.clone(), field.value.clone()), self.insertions);
        self.names.insert(field.name.clone(), self.insertions);
        self.curr_size += entry_size;
        self.queue.push_front((field, self.insertions));
    }

    /// Updates the size limit of the table. Growing reserves storage for
    /// the new capacity; shrinking evicts until the content fits again.
    pub(crate) fn resize(&mut self, new_max: usize) {
        debug!(max_size = new_max, "dynamic table resize");
        if new_max > self.max_size {
            let want = new_max / 32;
            self.queue.reserve(want.saturating_sub(self.queue.len()));
            self.max_size = new_max;
        } else {
            self.max_size = new_max;
            self.fit_size();
        }
    }

    /// Adjusts dynamic table content to fit its size.
    fn fit_size(&mut self) {
        while self.curr_size > self.max_size && !self.queue.is_empty() {
            self.evict_oldest();
        }
    }

    /// Removes the oldest entry and purges its fingerprints, unless a newer
    /// insertion of the same key has overwritten them.
    fn evict_oldest(&mut self) {
        let Some((field, ordinal)) = self.queue.pop_back() else {
            return;
        };
        self.curr_size -= field.size();
        trace!(name = field.name(), ordinal, "table evict");
        if self.names.get(field.name.as_str()) == Some(&ordinal) {
            self.names.remove(field.name.as_str());
        }
        let key = (field.name, field.value);
        if self.exact.get(&key) == Some(&ordinal) {
            self.exact.remove(&key);
        }
    }

    /// Translates an insertion ordinal to its current combined index.
    fn index_of(&self, ordinal: u64) -> usize {
        DYNAMIC_TABLE_OFFSET + (self.insertions - ordinal) as usize
    }
}
