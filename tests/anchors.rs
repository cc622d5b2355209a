use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tummer::{Anchor, Esa, Sequence, find_anchors};

fn subject_of(reference: &[u8]) -> Vec<u8> {
    Sequence::new("reference", reference).unwrap().to_subject()
}

/// Length of the longest prefix of `query` occurring in `text`, plus the
/// positions where that prefix occurs.
fn naive_prefix_match(text: &[u8], query: &[u8]) -> (usize, Vec<usize>) {
    let prefix_lengths: Vec<usize> = (0..text.len())
        .map(|position| {
            text[position..]
                .iter()
                .zip(query)
                .take_while(|(a, b)| a == b)
                .count()
        })
        .collect();

    let best = prefix_lengths.iter().copied().max().unwrap_or(0);
    let occurrences = prefix_lengths
        .iter()
        .enumerate()
        .filter(|&(_, &length)| length >= best)
        .map(|(position, _)| position)
        .collect();

    (best, occurrences)
}

/// The streaming algorithm with all index lookups replaced by brute force.
fn naive_anchors(subject: &[u8], query: &[u8], min_length: usize) -> Vec<Anchor> {
    let mut anchors = Vec::new();

    let mut pos_query = 0;
    while pos_query < query.len() {
        let (length, occurrences) = naive_prefix_match(subject, &query[pos_query..]);

        if occurrences.len() == 1 {
            let mut start_query = pos_query;
            let mut start_reference = occurrences[0];
            let mut full_length = length;

            while start_query > 0
                && start_reference > 0
                && query[start_query - 1] == subject[start_reference - 1]
            {
                start_query -= 1;
                start_reference -= 1;
                full_length += 1;
            }

            if full_length >= min_length {
                anchors.push(Anchor {
                    reference_position: start_reference,
                    query_position: start_query,
                    length: full_length,
                });
            }
        }

        pos_query += length + 1;
    }

    anchors
}

fn assert_anchor_invariants(subject: &[u8], query: &[u8], min_length: usize, anchors: &[Anchor]) {
    for anchor in anchors {
        let matched = &subject[anchor.reference_position..anchor.reference_position + anchor.length];

        assert_eq!(
            matched,
            &query[anchor.query_position..anchor.query_position + anchor.length]
        );
        assert!(anchor.length >= min_length);

        let occurrences = subject.windows(anchor.length).filter(|w| *w == matched).count();
        assert_eq!(occurrences, 1, "emitted match is not unique in the subject");

        let left_maximal = anchor.reference_position == 0
            || anchor.query_position == 0
            || subject[anchor.reference_position - 1] != query[anchor.query_position - 1];
        assert!(left_maximal);

        let reference_end = anchor.reference_position + anchor.length;
        let query_end = anchor.query_position + anchor.length;
        let right_maximal = reference_end == subject.len()
            || query_end == query.len()
            || subject[reference_end] != query[query_end];
        assert!(right_maximal);
    }
}

#[test]
fn repeated_prefix_is_not_emitted() {
    let esa = Esa::new(subject_of(b"ACGTACGT"));

    assert_eq!(find_anchors(&esa, b"ACGT", 3), []);
}

#[test]
fn unique_full_query_is_emitted() {
    let esa = Esa::new(subject_of(b"ACGTTTT"));

    assert_eq!(
        find_anchors(&esa, b"ACGT", 4),
        [Anchor {
            reference_position: 0,
            query_position: 0,
            length: 4,
        }]
    );
}

#[test]
fn unique_match_inside_a_repeat() {
    let esa = Esa::new(subject_of(b"AAAAAAG"));

    assert_eq!(
        find_anchors(&esa, b"AAAG", 4),
        [Anchor {
            reference_position: 3,
            query_position: 0,
            length: 4,
        }]
    );
}

#[test]
fn identical_sequences_are_covered_by_one_match() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let reference: Vec<u8> = (0..100).map(|_| b"ACGT"[rng.random_range(0..4)]).collect();

    let esa = Esa::new(subject_of(&reference));
    let anchors = find_anchors(&esa, &reference, 10);

    assert_eq!(
        anchors,
        [Anchor {
            reference_position: 0,
            query_position: 0,
            length: 100,
        }]
    );
}

#[test]
fn short_matches_are_filtered_by_the_threshold() {
    let esa = Esa::new(subject_of(b"AAAAAAG"));

    assert_eq!(find_anchors(&esa, b"AAAG", 5), []);
}

fn dna(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec((0usize..5).prop_map(|i| b"ACGTN"[i]), 1..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_failure_persistence(prop::test_runner::FileFailurePersistence::WithSource("proptest-regressions")))]

    #[test]
    fn agrees_with_naive_on_unrelated_sequences(
        reference in dna(200),
        query in dna(100),
        min_length in 1usize..12,
    ) {
        let subject = subject_of(&reference);
        let esa = Esa::new(subject.clone());

        let anchors = find_anchors(&esa, &query, min_length);

        prop_assert_eq!(&anchors, &naive_anchors(&subject, &query, min_length));
        assert_anchor_invariants(&subject, &query, min_length, &anchors);
    }

    #[test]
    fn agrees_with_naive_on_mutated_copies(
        reference in dna(300),
        seed in any::<u64>(),
        min_length in 5usize..15,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // a query that shares long stretches with the reference
        let query: Vec<u8> = reference
            .iter()
            .map(|&residue| {
                if rng.random_range(0..50) == 0 {
                    b"ACGT"[rng.random_range(0..4)]
                } else {
                    residue
                }
            })
            .collect();

        let subject = subject_of(&reference);
        let esa = Esa::new(subject.clone());

        let anchors = find_anchors(&esa, &query, min_length);

        prop_assert_eq!(&anchors, &naive_anchors(&subject, &query, min_length));
        assert_anchor_invariants(&subject, &query, min_length, &anchors);
    }
}
