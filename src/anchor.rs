use crate::esa::Esa;

/// A unique maximal match between the subject and a query. Positions are
/// zero-based; the driver shifts them when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub reference_position: usize,
    pub query_position: usize,
    pub length: usize,
}

/// Streams `query` left to right against the index and collects every match
/// that is unique in the subject, maximal in both directions and at least
/// `min_length` characters long.
///
/// Each round looks up the longest prefix of the remaining query, extends it
/// to the left as far as the characters agree (a singleton interval stays
/// unique under this), and then advances one past the matched region. A
/// position where nothing matches advances by a single character, so the
/// scan makes linear progress.
pub fn find_anchors(esa: &Esa, query: &[u8], min_length: usize) -> Vec<Anchor> {
    let text = esa.text();
    let mut anchors = Vec::new();

    let mut pos_query = 0;
    while pos_query < query.len() {
        let matched = esa.get_match_cached(&query[pos_query..]);

        let mut length = matched.length;
        let mut start_query = pos_query;
        let mut start_reference = esa.suffix_position(matched.interval.start);

        while start_query > 0
            && start_reference > 0
            && query[start_query - 1] == text[start_reference - 1]
        {
            start_query -= 1;
            start_reference -= 1;
            length += 1;
        }

        if matched.interval.is_singleton() && length >= min_length {
            anchors.push(Anchor {
                reference_position: start_reference,
                query_position: start_query,
                length,
            });
        }

        // one past the region matched this round, wherever the left
        // extension moved its start
        pos_query = start_query + length + 1;
    }

    anchors
}
