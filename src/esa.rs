use crate::EsaConfig;
use crate::construction;
use crate::lookup_table::{self, LookupTable};

/// An inclusive suffix array range `[start, end]` of suffixes sharing a
/// common prefix of `depth` characters.
///
/// A singleton interval means the prefix occurs exactly once in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LcpInterval {
    pub start: usize,
    pub end: usize,
    pub depth: usize,
}

impl LcpInterval {
    pub(crate) const EMPTY: LcpInterval = LcpInterval {
        start: 1,
        end: 0,
        depth: 0,
    };

    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// The result of a match lookup: the interval of the suffixes sharing the
/// longest matched query prefix and the number of matched characters.
///
/// For a singleton interval, `length` is the exact longest common prefix of
/// the query and the text occurrence. Otherwise it is only the number of
/// characters the descent verified, and further extension would not be
/// unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    pub interval: LcpInterval,
    pub length: usize,
}

/// The enhanced suffix array of a subject string: suffix array, inverse,
/// LCP array and the prefix lookup table, built once and immutable
/// afterwards.
///
/// The subject must end with a byte that occurs nowhere else in it
/// ([`Sequence::to_subject`](crate::Sequence::to_subject) guarantees this).
/// The terminal sentinel ensures that no suffix is a prefix of another one,
/// which the interval descent relies on.
pub struct Esa {
    text: Vec<u8>,
    suffix_array: Vec<i32>,
    inverse: Vec<i32>,
    lcp: Vec<i32>,
    lookup: LookupTable,
}

impl Esa {
    /// Builds the index with the default configuration.
    pub fn new(subject: Vec<u8>) -> Self {
        EsaConfig::new().build_index(subject)
    }

    pub(crate) fn build(text: Vec<u8>, config: &EsaConfig) -> Self {
        assert!(!text.is_empty(), "cannot index an empty subject");
        assert!(
            text.len() <= i32::MAX as usize,
            "the subject is too long for i32 suffix array entries"
        );
        let terminal = text[text.len() - 1];
        assert!(
            !text[..text.len() - 1].contains(&terminal),
            "the subject must end with a unique sentinel"
        );

        let suffix_array = construction::suffix_array(&text);
        let inverse = construction::inverse(&suffix_array);
        let lcp = construction::lcp_kasai(&text, &suffix_array, &inverse);

        let depth = lookup_table::clamp_depth(config.lookup_depth, text.len());
        let lookup = LookupTable::new(&text, &suffix_array, &lcp, depth);

        Esa {
            text,
            suffix_array,
            inverse,
            lcp,
            lookup,
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The length of the indexed subject string, sentinels included.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    pub fn suffix_array(&self) -> &[i32] {
        &self.suffix_array
    }

    pub fn inverse_suffix_array(&self) -> &[i32] {
        &self.inverse
    }

    /// The LCP array, one longer than the text, with -1 sentinels at both ends.
    pub fn lcp(&self) -> &[i32] {
        &self.lcp
    }

    /// The text position of the suffix at `rank`.
    pub fn suffix_position(&self, rank: usize) -> usize {
        self.suffix_array[rank] as usize
    }

    /// Finds the longest prefix of `query` occurring in the text by plain
    /// descent from the root interval.
    pub fn get_match(&self, query: &[u8]) -> PrefixMatch {
        self.descend(self.root(), query)
    }

    /// Like [`get_match`](Self::get_match), but the first characters are
    /// resolved through the lookup table.
    ///
    /// Falls back to root descent for queries shorter than the table depth,
    /// for prefixes containing non-canonical characters and for words absent
    /// from the text. Both lookups return identical results.
    pub fn get_match_cached(&self, query: &[u8]) -> PrefixMatch {
        let depth = self.lookup.depth();
        if depth == 0 || query.len() < depth {
            return self.get_match(query);
        }

        match self.lookup.lookup(&query[..depth]) {
            Some(interval) => self.descend(interval, query),
            None => self.get_match(query),
        }
    }

    fn root(&self) -> LcpInterval {
        LcpInterval {
            start: 0,
            end: self.text.len() - 1,
            depth: 0,
        }
    }

    /// Narrows `interval` character by character. Stops when the query is
    /// exhausted or no child interval matches; switches to a direct text
    /// scan once the interval is a singleton.
    fn descend(&self, mut interval: LcpInterval, query: &[u8]) -> PrefixMatch {
        loop {
            if interval.is_singleton() {
                return self.extend_singleton(interval, query);
            }

            if interval.depth == query.len() {
                return PrefixMatch {
                    interval,
                    length: interval.depth,
                };
            }

            match self.child_interval(interval, query[interval.depth]) {
                Some(child) => interval = child,
                None => {
                    return PrefixMatch {
                        interval,
                        length: interval.depth,
                    };
                }
            }
        }
    }

    fn extend_singleton(&self, interval: LcpInterval, query: &[u8]) -> PrefixMatch {
        let suffix = self.suffix_array[interval.start] as usize;
        let mut depth = interval.depth;

        while depth < query.len()
            && suffix + depth < self.text.len()
            && self.text[suffix + depth] == query[depth]
        {
            depth += 1;
        }

        PrefixMatch {
            interval: LcpInterval { depth, ..interval },
            length: depth,
        }
    }

    /// The sub-interval of suffixes continuing with `symbol` at the current
    /// depth. The bytes at that offset are sorted across the interval, so
    /// two binary searches delimit the child.
    fn child_interval(&self, interval: LcpInterval, symbol: u8) -> Option<LcpInterval> {
        let start = self.partition_point(interval, |byte| byte < symbol);
        let end = self.partition_point(interval, |byte| byte <= symbol);

        if start == end {
            return None;
        }

        Some(LcpInterval {
            start,
            end: end - 1,
            depth: interval.depth + 1,
        })
    }

    /// The first rank in `[interval.start, interval.end + 1]` whose suffix
    /// byte at the interval depth fails `predicate`.
    ///
    /// In a non-singleton shared-prefix interval every suffix extends past
    /// the shared prefix (a suffix ending exactly there would contain the
    /// unique terminal sentinel and be alone in its interval), so the byte
    /// access cannot run past the text.
    fn partition_point(&self, interval: LcpInterval, predicate: impl Fn(u8) -> bool) -> usize {
        let offset = interval.depth;
        let mut low = interval.start;
        let mut high = interval.end + 1;

        while low < high {
            let mid = low + (high - low) / 2;
            let suffix = self.suffix_array[mid] as usize;

            if predicate(self.text[suffix + offset]) {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        low
    }
}
